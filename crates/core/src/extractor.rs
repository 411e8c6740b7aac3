//! Extractor trait

use crate::error::{ArgumentError, ExtractionError};
use pi_stats_types::{FieldType, FieldValue};

/// Trait for all extractor families
///
/// An extractor turns the raw text of one device command into a typed field
/// value. Each family encodes exactly one normalization contract; new
/// metrics are added by pairing an existing family with a command and an
/// argument in the registry.
pub trait Extractor: Send + Sync {
    /// Short, stable name of this family (e.g. "voltage")
    fn family(&self) -> &'static str;

    /// Kind of value this family produces
    fn field_type(&self) -> FieldType;

    /// Check the argument this extractor is registered with
    ///
    /// Called once by the registry builder, never at query time.
    fn validate(&self, _argument: Option<&str>) -> Result<(), ArgumentError> {
        Ok(())
    }

    /// Normalize a raw device reply
    fn extract(&self, argument: Option<&str>, raw: &str) -> Result<FieldValue, ExtractionError>;
}

/// Type-erased extractor for dynamic dispatch
pub type BoxedExtractor = Box<dyn Extractor>;
