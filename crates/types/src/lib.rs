//! pi-stats-types: Shared data types for pi-stats telemetry records.
//!
//! This crate contains pure data types (field values, records, output
//! flavors) and the line-protocol encoding. It performs no I/O, making it
//! suitable as a foundation layer for the registry and the sampling loop.

pub mod field;
pub mod record;

// Re-export commonly used types at the crate root for convenience
pub use field::{FieldType, FieldValue};
pub use record::{OutputFlavor, Record};
