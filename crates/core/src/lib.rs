//! pi-stats-core: Core traits and registry for the pi-stats collector.
//!
//! This crate contains the seams the sampling loop is built on (FirmwareQuery,
//! HostIdentity, Extractor), the immutable MetricRegistry, the error
//! taxonomy, and shared constants.

pub mod constants;
mod error;
mod extractor;
mod query;
mod registry;

pub use constants::{
    DEFAULT_INTERVAL, DEFAULT_MEASUREMENT, HOST_KEY, HOST_SENTINEL, RESPONSE_LIMIT,
};
pub use error::{ArgumentError, ConfigError, ExtractionError, SampleError, TransportError};
pub use extractor::{BoxedExtractor, Extractor};
pub use query::{bound_response, command_line, FirmwareQuery, HostIdentity};
pub use registry::{MetricInfo, MetricRegistry, MetricSpec, RegistryBuilder};

// Re-export types used in trait signatures for convenience
pub use pi_stats_types::{FieldType, FieldValue};
