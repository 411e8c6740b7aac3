//! Collector settings
//!
//! The collector keeps no state on disk; every setting comes from the
//! command line and falls back to the defaults below.

use pi_stats_core::{DEFAULT_INTERVAL, DEFAULT_MEASUREMENT};
use pi_stats_types::OutputFlavor;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for one collector process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Delay between the end of one record and the start of the next
    pub interval: Duration,
    /// Shape of every emitted line
    pub flavor: OutputFlavor,
    /// Measurement name for tagged output
    pub measurement: String,
    /// Program used to reach the firmware
    pub vcgencmd: PathBuf,
}

impl Settings {
    /// Set the sampling interval in whole seconds
    pub fn with_step_secs(mut self, secs: u64) -> Self {
        self.interval = Duration::from_secs(secs);
        self
    }

    pub fn with_flavor(mut self, flavor: OutputFlavor) -> Self {
        self.flavor = flavor;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            flavor: OutputFlavor::default(),
            measurement: DEFAULT_MEASUREMENT.to_string(),
            vcgencmd: PathBuf::from("vcgencmd"),
        }
    }
}
