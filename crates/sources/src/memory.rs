//! Memory split sizes (`get_mem <pool>`)

use crate::one_of;
use crate::text::{require_property, scale_by_million};
use pi_stats_core::{ArgumentError, ExtractionError, Extractor, FieldType, FieldValue};

/// Pools `get_mem` understands
pub const POOLS: &[&str] = &["arm", "gpu", "malloc_total", "malloc", "reloc_total", "reloc"];

/// Normalizes `<pool>=<value>M` into an integer using the megaunit heuristic
#[derive(Debug, Clone, Copy, Default)]
pub struct MemorySize;

impl Extractor for MemorySize {
    fn family(&self) -> &'static str {
        "memory"
    }

    fn field_type(&self) -> FieldType {
        FieldType::Integer
    }

    fn validate(&self, argument: Option<&str>) -> Result<(), ArgumentError> {
        one_of(argument, POOLS)
    }

    fn extract(&self, argument: Option<&str>, raw: &str) -> Result<FieldValue, ExtractionError> {
        // The pool is both the device argument and the reply key
        let pool = argument.ok_or_else(|| ExtractionError::missing("pool"))?;
        let value = require_property(raw, pool)?;
        let value = value.strip_suffix('M').unwrap_or(value);
        Ok(FieldValue::Integer(scale_by_million(value)?))
    }
}
