//! In-memory firmware for tests and benchmarks

use pi_stats_core::{bound_response, command_line, FirmwareQuery, TransportError};
use std::collections::{HashMap, HashSet};

/// Canned replies for the built-in metric table, keyed by command line
const RASPBERRY_PI_REPLIES: &[(&str, &str)] = &[
    ("measure_temp", "temp=45.1'C\n"),
    ("measure_clock arm", "frequency(48)=600\n"),
    ("measure_clock core", "frequency(1)=250\n"),
    ("measure_clock h264", "frequency(28)=0\n"),
    ("measure_clock isp", "frequency(45)=0\n"),
    ("measure_clock v3d", "frequency(46)=250\n"),
    ("measure_clock uart", "frequency(22)=48\n"),
    ("measure_clock pwm", "frequency(25)=0\n"),
    ("measure_clock emmc", "frequency(50)=200\n"),
    ("measure_clock pixel", "frequency(29)=75\n"),
    ("measure_clock vec", "frequency(10)=0\n"),
    ("measure_clock hdmi", "frequency(0)=0\n"),
    ("measure_clock dpi", "frequency(4)=0\n"),
    ("measure_volts core", "volt=1.2000V\n"),
    ("measure_volts sdram_c", "volt=1.1000V\n"),
    ("measure_volts sdram_i", "volt=1.1000V\n"),
    ("measure_volts sdram_p", "volt=1.1000V\n"),
    ("get_config arm_freq", "arm_freq=1500\n"),
    ("get_config core_freq", "core_freq=500\n"),
    ("get_config gpu_freq", "gpu_freq=500\n"),
    ("get_config sdram_freq", "sdram_freq=3200\n"),
    ("get_mem arm", "arm=948M\n"),
    ("get_mem gpu", "gpu=76M\n"),
    ("get_mem malloc_total", "malloc_total=16M\n"),
    ("get_mem malloc", "malloc=13M\n"),
    ("get_mem reloc_total", "reloc_total=0M\n"),
    ("get_mem reloc", "reloc=0M\n"),
    (
        "mem_oom",
        "oom events: 0\nlifetime oom required: 0 Mbytes\ntotal time in oom handler: 0 ms\nmax time spent in oom handler: 0 ms\n",
    ),
    (
        "mem_reloc_stats",
        "alloc failures:     0\ncompactions:        0\nlegacy block fails: 0\n",
    ),
    ("get_throttled", "throttled=0x0\n"),
];

/// Firmware stand-in serving canned replies
///
/// Every query is recorded. Commands marked with [`FakeFirmware::fail`]
/// return a transport error; commands without a reply return
/// `TransportError::NotConfigured`.
#[derive(Debug, Clone, Default)]
pub struct FakeFirmware {
    replies: HashMap<String, String>,
    failing: HashSet<String>,
    calls: Vec<String>,
}

impl FakeFirmware {
    /// Create a fake with no replies
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fake answering every built-in metric like a healthy board
    pub fn raspberry_pi() -> Self {
        let mut fake = Self::new();
        for (command, reply) in RASPBERRY_PI_REPLIES {
            fake.replies.insert(command.to_string(), reply.to_string());
        }
        fake
    }

    /// Set (or replace) the reply for a command
    pub fn set_reply(&mut self, command: &str, argument: Option<&str>, reply: &str) {
        let line = command_line(command, argument);
        self.failing.remove(&line);
        self.replies.insert(line, reply.to_string());
    }

    /// Builder form of [`FakeFirmware::set_reply`]
    pub fn with_reply(mut self, command: &str, argument: Option<&str>, reply: &str) -> Self {
        self.set_reply(command, argument, reply);
        self
    }

    /// Make a command fail as if the device connection were down
    pub fn fail(&mut self, command: &str, argument: Option<&str>) {
        self.failing.insert(command_line(command, argument));
    }

    /// Every command line queried so far, in order
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl FirmwareQuery for FakeFirmware {
    fn query(&mut self, command: &str, argument: Option<&str>) -> Result<String, TransportError> {
        let line = command_line(command, argument);
        self.calls.push(line.clone());

        if self.failing.contains(&line) {
            return Err(TransportError::CommandFailed {
                command: line,
                status: "exit status: 255".to_string(),
                stderr: "VCHI initialization failed".to_string(),
            });
        }

        match self.replies.get(&line) {
            Some(reply) => Ok(bound_response(reply.clone())),
            None => Err(TransportError::NotConfigured { command: line }),
        }
    }
}
