//! Collaborator interfaces consumed by the record assembler

use crate::constants::RESPONSE_LIMIT;
use crate::error::TransportError;

/// Executes named device commands
///
/// Every call blocks until the device has answered. Replies are bounded to
/// [`RESPONSE_LIMIT`] bytes.
pub trait FirmwareQuery {
    fn query(&mut self, command: &str, argument: Option<&str>) -> Result<String, TransportError>;
}

impl<Q: FirmwareQuery + ?Sized> FirmwareQuery for &mut Q {
    fn query(&mut self, command: &str, argument: Option<&str>) -> Result<String, TransportError> {
        (**self).query(command, argument)
    }
}

impl<Q: FirmwareQuery + ?Sized> FirmwareQuery for Box<Q> {
    fn query(&mut self, command: &str, argument: Option<&str>) -> Result<String, TransportError> {
        (**self).query(command, argument)
    }
}

/// Resolves the identity of the host the collector runs on
///
/// Never fails: implementations return [`crate::HOST_SENTINEL`] when the
/// name cannot be determined.
pub trait HostIdentity {
    fn resolve(&self) -> String;
}

/// Render a command and its optional argument the way it is sent to the device
pub fn command_line(command: &str, argument: Option<&str>) -> String {
    match argument {
        Some(arg) => format!("{} {}", command, arg),
        None => command.to_string(),
    }
}

/// Truncate a device reply to [`RESPONSE_LIMIT`] bytes on a char boundary
pub fn bound_response(mut text: String) -> String {
    if text.len() > RESPONSE_LIMIT {
        let mut end = RESPONSE_LIMIT;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        log::debug!("Device reply truncated from {} to {} bytes", text.len(), end);
        text.truncate(end);
    }
    text
}
