//! Telemetry record and its line-protocol encoding

use crate::field::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of an emitted line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFlavor {
    /// `<measurement>,host=<host> <fields> <timestamp>`
    #[serde(rename = "tagged")]
    #[default]
    Tagged,
    /// `host="<host>",<fields>` with no measurement, tags or timestamp
    #[serde(rename = "bare")]
    Bare,
}

impl OutputFlavor {
    /// Whether host identity travels in the tag set
    pub fn host_as_tag(&self) -> bool {
        matches!(self, OutputFlavor::Tagged)
    }

    /// Whether records of this flavor carry a timestamp
    pub fn has_timestamp(&self) -> bool {
        matches!(self, OutputFlavor::Tagged)
    }
}

impl fmt::Display for OutputFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFlavor::Tagged => f.write_str("tagged"),
            OutputFlavor::Bare => f.write_str("bare"),
        }
    }
}

impl FromStr for OutputFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tagged" => Ok(OutputFlavor::Tagged),
            "bare" => Ok(OutputFlavor::Bare),
            other => Err(format!(
                "unknown output flavor '{}' (expected 'tagged' or 'bare')",
                other
            )),
        }
    }
}

/// One sample of every registered metric.
///
/// Field keys are unique within a record. A record is built fresh each tick
/// and discarded once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    measurement: String,
    tags: Vec<(String, String)>,
    fields: Vec<(String, FieldValue)>,
    /// Nanoseconds since the Unix epoch
    timestamp: Option<i64>,
}

impl Record {
    /// Create an empty record for the given measurement
    pub fn new(measurement: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
            tags: Vec::new(),
            fields: Vec::new(),
            timestamp: None,
        }
    }

    /// Create an empty record with room for `fields` values
    pub fn with_capacity(measurement: impl Into<String>, fields: usize) -> Self {
        Self {
            fields: Vec::with_capacity(fields),
            ..Self::new(measurement)
        }
    }

    /// Add a tag
    pub fn push_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.push((key.into(), value.into()));
    }

    /// Add a field. Returns `false` and leaves the record untouched if the
    /// key is already present.
    pub fn push_field(&mut self, key: impl Into<String>, value: FieldValue) -> bool {
        let key = key.into();
        if self.fields.iter().any(|(k, _)| *k == key) {
            return false;
        }
        self.fields.push((key, value));
        true
    }

    pub fn set_timestamp(&mut self, nanos: i64) {
        self.timestamp = Some(nanos);
    }

    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    pub fn tags(&self) -> &[(String, String)] {
        &self.tags
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    /// Look up a field value by key
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    /// Encode the record as a single line (without the trailing newline)
    pub fn to_line(&self, flavor: OutputFlavor) -> String {
        let mut line = String::with_capacity(32 + self.fields.len() * 24);

        if flavor == OutputFlavor::Tagged {
            escape_into(&mut line, &self.measurement, &[',', ' ']);
            for (key, value) in &self.tags {
                line.push(',');
                escape_into(&mut line, key, &[',', '=', ' ']);
                line.push('=');
                escape_into(&mut line, value, &[',', '=', ' ']);
            }
            line.push(' ');
        }

        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            escape_into(&mut line, key, &[',', '=', ' ']);
            line.push('=');
            line.push_str(&value.to_string());
        }

        if flavor == OutputFlavor::Tagged {
            if let Some(ts) = self.timestamp {
                line.push(' ');
                line.push_str(&ts.to_string());
            }
        }

        line
    }
}

/// Append `s` to `out`, backslash-escaping every character in `special`
fn escape_into(out: &mut String, s: &str, special: &[char]) {
    for c in s.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}
