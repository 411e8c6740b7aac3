//! Shared constants

use std::time::Duration;

/// Largest device reply kept for extraction, in bytes
pub const RESPONSE_LIMIT: usize = 4096;

/// Default delay between two records
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Measurement name written at the start of every tagged line
pub const DEFAULT_MEASUREMENT: &str = "raspberry_pi";

/// Tag (or field, in bare output) carrying the host identity
pub const HOST_KEY: &str = "host";

/// Host identity used when the hostname cannot be resolved
pub const HOST_SENTINEL: &str = "???";
