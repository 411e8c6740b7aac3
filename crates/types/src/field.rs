//! Typed field values carried by a telemetry record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of value a metric produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Signed 64-bit integer, written with an `i` suffix
    Integer,
    /// Decimal number kept in its textual form
    Float,
    /// Free text, written quoted
    String,
}

/// A single normalized metric value.
///
/// The variant decides how the value is written on the wire: integers carry
/// the `i` marker, floats are written verbatim and strings are quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Integer(i64),
    /// Decimal string exactly as normalized from the device (e.g. `"1.2"`)
    Float(String),
    String(String),
}

impl FieldValue {
    /// Get the kind of this value
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Integer(_) => FieldType::Integer,
            FieldValue::Float(_) => FieldType::Float,
            FieldValue::String(_) => FieldType::String,
        }
    }

    /// Get the integer payload, if this is an integer value
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    /// Formats the value as a line-protocol field value
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}i", n),
            FieldValue::Float(s) => f.write_str(s),
            FieldValue::String(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str("\"")
            }
        }
    }
}
