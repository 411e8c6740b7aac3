//! Rail voltages (`measure_volts <rail>`)

use crate::one_of;
use crate::text::{decimal, require_property, trim_decimal};
use pi_stats_core::{ArgumentError, ExtractionError, Extractor, FieldType, FieldValue};

/// Rails `measure_volts` understands
pub const RAILS: &[&str] = &["core", "sdram_c", "sdram_i", "sdram_p"];

/// Normalizes `volt=N.NNNNNNV` into a decimal number of volts
#[derive(Debug, Clone, Copy, Default)]
pub struct Voltage;

impl Extractor for Voltage {
    fn family(&self) -> &'static str {
        "voltage"
    }

    fn field_type(&self) -> FieldType {
        FieldType::Float
    }

    fn validate(&self, argument: Option<&str>) -> Result<(), ArgumentError> {
        one_of(argument, RAILS)
    }

    fn extract(&self, _argument: Option<&str>, raw: &str) -> Result<FieldValue, ExtractionError> {
        let value = require_property(raw, "volt")?;
        let value = value.strip_suffix('V').unwrap_or(value);
        Ok(FieldValue::Float(decimal(trim_decimal(value))?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voltage() {
        assert_eq!(
            Voltage.extract(Some("core"), "volt=1.200000V\n").unwrap(),
            FieldValue::Float("1.2".to_string())
        );
    }

    #[test]
    fn test_voltage_trim_is_literal() {
        // No rounding: every significant digit survives
        assert_eq!(
            Voltage.extract(Some("core"), "volt=0.8438V").unwrap(),
            FieldValue::Float("0.8438".to_string())
        );
        assert_eq!(
            Voltage.extract(Some("core"), "volt=1.000000V").unwrap(),
            FieldValue::Float("1".to_string())
        );
    }

    #[test]
    fn test_voltage_missing_property() {
        assert_eq!(
            Voltage.extract(Some("sdram_c"), "error=2 error_msg=\"Invalid arguments\""),
            Err(ExtractionError::missing("volt"))
        );
    }

    #[test]
    fn test_voltage_validation() {
        assert!(Voltage.validate(Some("sdram_p")).is_ok());
        assert!(Voltage.validate(Some("arm")).is_err());
    }
}
