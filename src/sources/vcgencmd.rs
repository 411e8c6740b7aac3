//! Firmware access through the `vcgencmd` utility

use pi_stats_core::{bound_response, command_line, FirmwareQuery, TransportError};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Runs each device command through the `vcgencmd` binary
///
/// One blocking child process per query. A reply of the form
/// `error=<n> error_msg="..."` means the firmware refused the command and
/// is reported as a transport error.
#[derive(Debug, Clone)]
pub struct Vcgencmd {
    program: PathBuf,
}

impl Vcgencmd {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl FirmwareQuery for Vcgencmd {
    fn query(&mut self, command: &str, argument: Option<&str>) -> Result<String, TransportError> {
        let output = Command::new(&self.program)
            .arg(command)
            .args(argument)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| TransportError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(TransportError::CommandFailed {
                command: command_line(command, argument),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let reply = bound_response(String::from_utf8_lossy(&output.stdout).into_owned());
        if reply.trim_start().starts_with("error=") {
            return Err(TransportError::Rejected {
                command: command_line(command, argument),
                reply: reply.trim().to_string(),
            });
        }

        Ok(reply)
    }
}
