//! Text helpers shared by the extractor families

use pi_stats_core::ExtractionError;

/// Find the value of `key=value` in a device reply
///
/// The reply is split on whitespace and the first token of the form
/// `<key>=<value>` wins. Values never contain whitespace.
pub fn string_property<'a>(raw: &'a str, key: &str) -> Option<&'a str> {
    raw.split_whitespace()
        .find_map(|token| token.strip_prefix(key)?.strip_prefix('='))
}

/// Like [`string_property`] but fails with `PropertyMissing`
pub fn require_property<'a>(raw: &'a str, key: &str) -> Result<&'a str, ExtractionError> {
    string_property(raw, key).ok_or_else(|| ExtractionError::missing(key))
}

/// Find the line whose leading-whitespace-trimmed text starts with `label`
pub fn find_labeled_line<'a>(raw: &'a str, label: &str) -> Option<&'a str> {
    raw.lines()
        .map(str::trim_start)
        .find(|line| line.starts_with(label))
}

/// Strip trailing zero digits after a decimal point, then a dangling `.`
///
/// Values without a `.` are returned unchanged. This is a literal character
/// trim, not rounding: `"1.200000"` becomes `"1.2"`, `"45.0"` becomes `"45"`.
pub fn trim_decimal(value: &str) -> &str {
    if !value.contains('.') {
        return value;
    }
    let trimmed = value.trim_end_matches('0');
    trimmed.strip_suffix('.').unwrap_or(trimmed)
}

/// Check that `value` is a finite decimal number and return it owned
pub fn decimal(value: &str) -> Result<String, ExtractionError> {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(value.to_string()),
        Ok(_) => Err(ExtractionError::parse(value, "not a finite number")),
        Err(e) => Err(ExtractionError::parse(value, e.to_string())),
    }
}

/// Append six zero digits unless the value is literally `0`, then parse
///
/// This is the collector's textual megaunit heuristic (`"12"` becomes
/// 12000000), kept as-is for compatibility with existing dashboards. It is
/// not a binary multiplier.
pub fn scale_by_million(value: &str) -> Result<i64, ExtractionError> {
    // Reject anything that is not an integer before padding it
    integer(value)?;
    let digits = if value == "0" {
        value.to_string()
    } else {
        format!("{}000000", value)
    };
    digits
        .parse::<i64>()
        .map_err(|e| ExtractionError::parse(value, e.to_string()))
}

/// Parse a plain decimal integer
pub fn integer(value: &str) -> Result<i64, ExtractionError> {
    value
        .parse::<i64>()
        .map_err(|e| ExtractionError::parse(value, e.to_string()))
}
