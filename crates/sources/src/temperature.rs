//! SoC temperature (`measure_temp`)

use crate::text::{decimal, require_property, trim_decimal};
use pi_stats_core::{ExtractionError, Extractor, FieldType, FieldValue};

/// Normalizes `temp=NN.N'C` into a decimal number of degrees Celsius
#[derive(Debug, Clone, Copy, Default)]
pub struct Temperature;

impl Extractor for Temperature {
    fn family(&self) -> &'static str {
        "temperature"
    }

    fn field_type(&self) -> FieldType {
        FieldType::Float
    }

    fn extract(&self, _argument: Option<&str>, raw: &str) -> Result<FieldValue, ExtractionError> {
        let value = require_property(raw, "temp")?;
        let value = value.strip_suffix("'C").unwrap_or(value);
        Ok(FieldValue::Float(decimal(trim_decimal(value))?))
    }
}
