//! Error taxonomy
//!
//! Transport and extraction failures are fatal to the collector; they are
//! wrapped in [`SampleError`] together with the metric that failed.
//! Configuration errors can only happen while the registry is built.

use crate::query::command_line;
use thiserror::Error;

/// The device command could not be executed
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("unable to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' failed with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("device rejected '{command}': {reply}")]
    Rejected { command: String, reply: String },

    #[error("no reply available for '{command}'")]
    NotConfigured { command: String },
}

/// A device reply did not match the shape its extractor expects
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("property '{property}' missing from response")]
    PropertyMissing { property: String },

    #[error("unable to parse '{value}': {reason}")]
    Parse { value: String, reason: String },
}

impl ExtractionError {
    pub fn missing(property: impl Into<String>) -> Self {
        ExtractionError::PropertyMissing {
            property: property.into(),
        }
    }

    pub fn parse(value: impl Into<String>, reason: impl Into<String>) -> Self {
        ExtractionError::Parse {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// An extractor family cannot work with the argument it was registered with
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("an argument is required")]
    Missing,

    #[error("takes no argument, got '{0}'")]
    Unexpected(String),

    #[error("unknown argument '{argument}' (expected one of: {})", .expected.join(", "))]
    Unknown {
        argument: String,
        expected: &'static [&'static str],
    },
}

/// Invalid metric table, detected at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("metric '{0}' is registered more than once")]
    DuplicateKey(String),

    #[error("metric keys must not be empty")]
    EmptyKey,

    #[error("metric '{0}' has an empty device command")]
    EmptyCommand(String),

    #[error("metric '{key}' ({family}): {source}")]
    InvalidArgument {
        key: String,
        family: &'static str,
        #[source]
        source: ArgumentError,
    },

    #[error("metric key '{0}' is reserved for the host identity")]
    ReservedKey(String),

    #[error("no metrics registered")]
    Empty,
}

/// Failure while producing or writing one record
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("metric '{key}': {source}")]
    Transport {
        key: String,
        #[source]
        source: TransportError,
    },

    #[error(
        "metric '{key}': unable to extract from '{}': {source}",
        command_line(.command, .argument.as_deref())
    )]
    Extraction {
        key: String,
        command: String,
        argument: Option<String>,
        #[source]
        source: ExtractionError,
    },

    #[error("system clock is outside the representable timestamp range")]
    Clock,

    #[error("unable to write record: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_error_names_command() {
        let err = SampleError::Extraction {
            key: "arm_mem".to_string(),
            command: "get_mem".to_string(),
            argument: Some("arm".to_string()),
            source: ExtractionError::missing("arm"),
        };
        assert_eq!(
            err.to_string(),
            "metric 'arm_mem': unable to extract from 'get_mem arm': property 'arm' missing from response"
        );
    }

    #[test]
    fn test_unknown_argument_lists_expected() {
        let err = ConfigError::InvalidArgument {
            key: "x".to_string(),
            family: "throttle",
            source: ArgumentError::Unknown {
                argument: "hot".to_string(),
                expected: &["throttled", "under_voltage"],
            },
        };
        assert_eq!(
            err.to_string(),
            "metric 'x' (throttle): unknown argument 'hot' (expected one of: throttled, under_voltage)"
        );
    }
}
