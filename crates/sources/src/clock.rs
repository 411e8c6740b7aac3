//! Clock frequencies (`measure_clock <clock>`)

use crate::one_of;
use crate::text::scale_by_million;
use pi_stats_core::{ArgumentError, ExtractionError, Extractor, FieldType, FieldValue};

/// Clocks `measure_clock` understands
pub const CLOCKS: &[&str] = &[
    "arm", "core", "h264", "isp", "v3d", "uart", "pwm", "emmc", "pixel", "vec", "hdmi", "dpi",
];

/// Normalizes `frequency(<n>)=<digits>` into an integer
///
/// The reply's left-hand side names the clock by its internal id, so the
/// value is taken from after the first `=` instead of by property name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockFrequency;

impl Extractor for ClockFrequency {
    fn family(&self) -> &'static str {
        "clock"
    }

    fn field_type(&self) -> FieldType {
        FieldType::Integer
    }

    fn validate(&self, argument: Option<&str>) -> Result<(), ArgumentError> {
        one_of(argument, CLOCKS)
    }

    fn extract(&self, _argument: Option<&str>, raw: &str) -> Result<FieldValue, ExtractionError> {
        let (_, value) = raw
            .trim()
            .split_once('=')
            .ok_or_else(|| ExtractionError::parse(raw.trim(), "missing '=' separator"))?;
        Ok(FieldValue::Integer(scale_by_million(value.trim())?))
    }
}
