//! Table column descriptors and value formatting.
//!
//! A [`Field`] is an immutable descriptor shared read-only across all rows of
//! a table: display title, lookup key, advisory width, and a formatting rule.
//! Prefix-stripping id columns and epoch date columns are plain configuration
//! here rather than separate types.

use chrono::DateTime;
use serde_json::Value;

use crate::view::ViewCell;

/// Formatting rule applied to a field's raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Stringify as-is.
    Text,
    /// Strip a fixed prefix from string values before display.
    StripPrefix(&'static str),
    /// Interpret numeric values as epoch milliseconds, display ISO-8601.
    EpochMillis,
}

/// One column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Friendly name shown in the table header.
    pub title: String,
    /// Lookup key into a record. Lowercased title by default.
    pub key: String,
    /// Advisory number of characters before consumers truncate.
    pub length: u16,
    pub format: FieldFormat,
    /// Column should use the remaining horizontal space.
    pub fill: bool,
}

impl Field {
    fn with(title: &str, length: u16, format: FieldFormat, fill: bool) -> Self {
        Self {
            title: title.to_string(),
            key: title.to_lowercase(),
            length,
            format,
            fill,
        }
    }

    /// Plain text column.
    pub fn text(title: &str) -> Self {
        Self::with(title, 4, FieldFormat::Text, false)
    }

    /// Column that uses the remaining space.
    pub fn fill(title: &str) -> Self {
        Self::with(title, 100, FieldFormat::Text, true)
    }

    /// Column holding server-formatted date strings.
    pub fn date(title: &str) -> Self {
        Self::with(title, 12, FieldFormat::Text, false)
    }

    /// Column holding epoch-milliseconds timestamps.
    pub fn epoch(title: &str) -> Self {
        Self::with(title, 12, FieldFormat::EpochMillis, false)
    }

    /// Identifier column with a fixed prefix stripped for display.
    pub fn id(title: &str, prefix: &'static str) -> Self {
        Self::with(title, 4, FieldFormat::StripPrefix(prefix), false)
    }

    /// Decentralized identifier column (`did:igo:` prefix hidden).
    pub fn did(title: &str) -> Self {
        Self::id(title, "did:igo:")
    }

    /// Hardware identifier column (`hid:` prefix hidden).
    pub fn hid() -> Self {
        Self::id("HID", "hid:")
    }

    pub fn with_length(mut self, length: u16) -> Self {
        self.length = length;
        self
    }

    /// Converts a raw value to display text per this field's formatting rule.
    pub fn format(&self, value: &Value) -> String {
        match self.format {
            FieldFormat::Text => stringify(value),
            FieldFormat::StripPrefix(prefix) => match value {
                Value::String(s) => s.strip_prefix(prefix).unwrap_or(s).to_string(),
                other => stringify(other),
            },
            FieldFormat::EpochMillis => match value.as_i64() {
                Some(millis) => DateTime::from_timestamp_millis(millis)
                    .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
                    .unwrap_or_else(|| stringify(value)),
                None => stringify(value),
            },
        }
    }

    /// Truncates for display. Identity in the base rule: `length` is advisory
    /// metadata for layout, not a hard cut here.
    pub fn shorten(&self, text: String) -> String {
        text
    }

    /// Builds a display cell. Missing/null data renders as empty string.
    pub fn cell(&self, value: &Value) -> ViewCell {
        if value.is_null() {
            return ViewCell::plain(String::new());
        }
        ViewCell::plain(self.shorten(self.format(value)))
    }
}

/// Display stringification of a JSON value. Strings render without quotes.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_field_defaults() {
        let f = Field::text("Kind");
        assert_eq!(f.key, "kind");
        assert_eq!(f.length, 4);
        assert!(!f.fill);
    }

    #[test]
    fn strip_prefix_only_when_present() {
        let f = Field::did("DID");
        assert_eq!(f.format(&json!("did:igo:abc123")), "abc123");
        assert_eq!(f.format(&json!("xyz")), "xyz");
    }

    #[test]
    fn epoch_field_formats_iso8601() {
        let f = Field::epoch("Created");
        assert_eq!(f.format(&json!(0)), "1970-01-01T00:00:00.000Z");
        assert_eq!(f.format(&json!(1_500_000_000_000i64)), "2017-07-14T02:40:00.000Z");
        // Non-numeric values fall back to plain stringification.
        assert_eq!(f.format(&json!("soon")), "soon");
    }

    #[test]
    fn cell_renders_null_as_empty() {
        let f = Field::text("Kind");
        assert_eq!(f.cell(&Value::Null).text, "");
        assert_eq!(f.cell(&json!(42)).text, "42");
    }

    #[test]
    fn shorten_is_identity() {
        let f = Field::text("Kind").with_length(2);
        assert_eq!(f.shorten("longtext".to_string()), "longtext");
    }
}
