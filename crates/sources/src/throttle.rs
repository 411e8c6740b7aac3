//! Throttling state (`get_throttled`)
//!
//! The firmware reports a bitmask where bits 0-3 describe the current state
//! and bits 16-19 record whether the same condition has occurred since boot.

use crate::text::require_property;
use pi_stats_core::{ArgumentError, ExtractionError, Extractor, FieldType, FieldValue};
use std::str::FromStr;

/// Every throttle flag name, also used as the metric key
pub const THROTTLE_FLAGS: &[&str] = &[
    "under_voltage",
    "frequency_cap",
    "throttled",
    "soft_temp_limit",
    "under_voltage_occurred",
    "frequency_cap_occurred",
    "throttled_occurred",
    "soft_temp_limit_occurred",
];

/// Offset between a live condition bit and its "occurred" companion
const OCCURRED_SHIFT: u32 = 16;

/// A throttling condition reported by the firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleCondition {
    UnderVoltage,
    FrequencyCap,
    Throttled,
    SoftTempLimit,
}

impl ThrottleCondition {
    fn bit(self) -> u32 {
        match self {
            ThrottleCondition::UnderVoltage => 0,
            ThrottleCondition::FrequencyCap => 1,
            ThrottleCondition::Throttled => 2,
            ThrottleCondition::SoftTempLimit => 3,
        }
    }
}

/// One bit of the throttle mask, selected by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleFlag {
    pub condition: ThrottleCondition,
    /// Select the sticky "has occurred since boot" bit instead of the live one
    pub occurred: bool,
}

impl ThrottleFlag {
    /// Bit position of this flag in the mask
    pub fn bit(&self) -> u32 {
        let bit = self.condition.bit();
        if self.occurred {
            bit + OCCURRED_SHIFT
        } else {
            bit
        }
    }

    /// Read this flag from a throttle mask
    pub fn is_set(&self, mask: u32) -> bool {
        (mask >> self.bit()) & 1 == 1
    }
}

impl FromStr for ThrottleFlag {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, occurred) = match s.strip_suffix("_occurred") {
            Some(name) => (name, true),
            None => (s, false),
        };
        let condition = match name {
            "under_voltage" => ThrottleCondition::UnderVoltage,
            "frequency_cap" => ThrottleCondition::FrequencyCap,
            "throttled" => ThrottleCondition::Throttled,
            "soft_temp_limit" => ThrottleCondition::SoftTempLimit,
            _ => {
                return Err(ArgumentError::Unknown {
                    argument: s.to_string(),
                    expected: THROTTLE_FLAGS,
                })
            }
        };
        Ok(ThrottleFlag {
            condition,
            occurred,
        })
    }
}

/// Parse the `0x`-prefixed hexadecimal mask from `throttled=0x<hex>`
pub fn parse_mask(value: &str) -> Result<u32, ExtractionError> {
    let hex = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u32::from_str_radix(hex, 16).map_err(|e| ExtractionError::parse(value, e.to_string()))
}

/// Decodes one flag of the throttle mask into 0 or 1
///
/// `get_throttled` takes no argument; the flag is fixed when the metric is
/// registered and only selects which bit of the reply to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    flag: ThrottleFlag,
}

impl Throttle {
    /// Create an extractor for the flag named `name` (see [`THROTTLE_FLAGS`])
    pub fn new(name: &str) -> Result<Self, ArgumentError> {
        Ok(Self::from_flag(name.parse()?))
    }

    pub fn from_flag(flag: ThrottleFlag) -> Self {
        Self { flag }
    }

    pub fn flag(&self) -> ThrottleFlag {
        self.flag
    }
}

impl Extractor for Throttle {
    fn family(&self) -> &'static str {
        "throttle"
    }

    fn field_type(&self) -> FieldType {
        FieldType::Integer
    }

    fn validate(&self, argument: Option<&str>) -> Result<(), ArgumentError> {
        match argument {
            Some(arg) => Err(ArgumentError::Unexpected(arg.to_string())),
            None => Ok(()),
        }
    }

    fn extract(&self, _argument: Option<&str>, raw: &str) -> Result<FieldValue, ExtractionError> {
        let mask = parse_mask(require_property(raw, "throttled")?)?;
        Ok(FieldValue::Integer(i64::from(self.flag.is_set(mask))))
    }
}
