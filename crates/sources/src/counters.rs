//! Labeled-line counters (`mem_oom`, `mem_reloc_stats`)
//!
//! These commands answer with one `label: value` line per statistic, e.g.
//!
//! ```text
//! oom events: 0
//! lifetime oom required: 0 Mbytes
//! total time in oom handler: 0 ms
//! max time spent in oom handler: 0 ms
//! ```

use crate::text::{find_labeled_line, integer};
use pi_stats_core::{ArgumentError, ExtractionError, Extractor, FieldType, FieldValue};

/// Extracts the integer on the line starting with a fixed label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledCounter {
    label: &'static str,
    /// Unit suffix stripped from the value, if present
    unit: Option<&'static str>,
}

impl LabeledCounter {
    pub const fn new(label: &'static str) -> Self {
        Self { label, unit: None }
    }

    pub const fn with_unit(label: &'static str, unit: &'static str) -> Self {
        Self {
            label,
            unit: Some(unit),
        }
    }
}

impl Extractor for LabeledCounter {
    fn family(&self) -> &'static str {
        "labeled_counter"
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
        let line = find_labeled_line(raw, self.label)
            .ok_or_else(|| ExtractionError::missing(self.label))?;
        let value = line[self.label.len()..].trim_end();
        let value = value.strip_prefix(':').unwrap_or(value).trim_start();
        let value = match self.unit {
            Some(unit) => value.strip_suffix(unit).unwrap_or(value),
            None => value,
        };
        Ok(FieldValue::Integer(integer(value)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEM_OOM: &str = "oom events: 3\n\
                           lifetime oom required: 12 Mbytes\n\
                           total time in oom handler: 250 ms\n\
                           max time spent in oom handler: 90 ms\n";

    const MEM_RELOC_STATS: &str = "alloc failures:     1\n\
                                   compactions:        17\n\
                                   legacy block fails: 0\n";

    #[test]
    fn test_oom_count() {
        let counter = LabeledCounter::new("oom events");
        assert_eq!(counter.extract(None, MEM_OOM).unwrap(), FieldValue::Integer(3));
    }

    #[test]
    fn test_oom_ms_strips_unit() {
        let counter = LabeledCounter::with_unit("total time in oom handler", " ms");
        assert_eq!(counter.extract(None, MEM_OOM).unwrap(), FieldValue::Integer(250));
    }

    #[test]
    fn test_reloc_stats() {
        assert_eq!(
            LabeledCounter::new("compactions").extract(None, MEM_RELOC_STATS).unwrap(),
            FieldValue::Integer(17)
        );
        assert_eq!(
            LabeledCounter::new("legacy block fails").extract(None, MEM_RELOC_STATS).unwrap(),
            FieldValue::Integer(0)
        );
    }

    #[test]
    fn test_indented_last_line_without_newline() {
        let raw = "  alloc failures: 4";
        assert_eq!(
            LabeledCounter::new("alloc failures").extract(None, raw).unwrap(),
            FieldValue::Integer(4)
        );
    }

    #[test]
    fn test_missing_line() {
        assert_eq!(
            LabeledCounter::new("oom events").extract(None, MEM_RELOC_STATS),
            Err(ExtractionError::missing("oom events"))
        );
    }

    #[test]
    fn test_unit_left_in_place_is_a_parse_error() {
        let counter = LabeledCounter::new("total time in oom handler");
        assert!(matches!(
            counter.extract(None, MEM_OOM),
            Err(ExtractionError::Parse { .. })
        ));
    }

    #[test]
    fn test_takes_no_argument() {
        let counter = LabeledCounter::new("oom events");
        assert!(counter.validate(None).is_ok());
        assert_eq!(
            counter.validate(Some("x")),
            Err(ArgumentError::Unexpected("x".to_string()))
        );
    }
}
