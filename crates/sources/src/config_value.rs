//! Firmware configuration values (`get_config <key>`)

use crate::text::{require_property, scale_by_million};
use pi_stats_core::{ArgumentError, ExtractionError, Extractor, FieldType, FieldValue};

/// Normalizes `<key>=<value>` into an integer using the megaunit heuristic
///
/// Configured frequencies are given in MHz (`arm_freq=1500`), hence the six
/// zero digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigValue;

impl Extractor for ConfigValue {
    fn family(&self) -> &'static str {
        "config"
    }

    fn field_type(&self) -> FieldType {
        FieldType::Integer
    }

    fn validate(&self, argument: Option<&str>) -> Result<(), ArgumentError> {
        match argument {
            Some(key) if !key.trim().is_empty() => Ok(()),
            _ => Err(ArgumentError::Missing),
        }
    }

    fn extract(&self, argument: Option<&str>, raw: &str) -> Result<FieldValue, ExtractionError> {
        let key = argument.ok_or_else(|| ExtractionError::missing("config key"))?;
        let value = require_property(raw, key)?;
        Ok(FieldValue::Integer(scale_by_million(value)?))
    }
}
