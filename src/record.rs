//! Records: JSON-backed rows with synthetic uids.
//!
//! A record is an opaque mapping from field name to JSON value, exactly as
//! the server sent it, plus bookkeeping the inspector adds on insertion.
//! Keys starting with [`PRIVATE_PREFIX`] are reserved for internal use and
//! are hidden from detail output and search.

use serde_json::{Map, Value};

/// Keys starting with this prefix are internal and never displayed or searched.
pub const PRIVATE_PREFIX: char = '_';

/// The raw field mapping of one record.
pub type Fields = Map<String, Value>;

/// One row of tabular data.
#[derive(Debug, Clone)]
pub struct Record {
    /// Synthetic id assigned at insertion time, unique within one table.
    pub uid: u64,
    /// Transient selection flag, mirrors the owning table's selection.
    pub selected: bool,
    pub fields: Fields,
}

impl Record {
    pub fn new(uid: u64, fields: Fields) -> Self {
        Self {
            uid,
            selected: false,
            fields,
        }
    }

    /// Looks up a field by key. Missing keys yield `Null` rather than erroring.
    pub fn get(&self, key: &str) -> Value {
        self.fields.get(key).cloned().unwrap_or(Value::Null)
    }

    /// Pretty-printed serialization of the record for the details panel,
    /// with private-prefixed keys omitted at every nesting level.
    pub fn detail_text(&self) -> String {
        let clean = strip_private(&Value::Object(self.fields.clone()));
        serde_json::to_string_pretty(&clean).unwrap_or_default()
    }
}

/// Recursively removes map entries whose key starts with [`PRIVATE_PREFIX`].
fn strip_private(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| !key.starts_with(PRIVATE_PREFIX))
                .map(|(key, v)| (key.clone(), strip_private(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_private).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => Record::new(0, map),
            _ => panic!("record fixture must be an object"),
        }
    }

    #[test]
    fn get_missing_field_is_null() {
        let r = record(json!({"uid": "abc"}));
        assert_eq!(r.get("uid"), json!("abc"));
        assert_eq!(r.get("nope"), Value::Null);
    }

    #[test]
    fn detail_text_hides_private_keys_recursively() {
        let r = record(json!({
            "uid": "abc",
            "_internal": 7,
            "nested": {"_hidden": true, "shown": [{"_x": 1, "y": 2}]}
        }));
        let text = r.detail_text();
        assert!(text.contains("\"uid\""));
        assert!(text.contains("\"shown\""));
        assert!(text.contains("\"y\""));
        assert!(!text.contains("_internal"));
        assert!(!text.contains("_hidden"));
        assert!(!text.contains("_x"));
    }

    #[test]
    fn detail_text_is_pretty_printed() {
        let r = record(json!({"a": 1, "b": 2}));
        let text = r.detail_text();
        assert!(text.contains('\n'));
        assert!(text.starts_with('{'));
    }
}
