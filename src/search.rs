//! Recursive record search.
//!
//! A search term wrapped in double quotes matches case-sensitively with the
//! quotes stripped; anything else is lowercased and matched case-insensitively.
//! Matching descends into nested objects and arrays, skips private-prefixed
//! keys, and only ever matches string leaves.

use serde_json::Value;

use crate::record::{Fields, PRIVATE_PREFIX, Record};

/// A parsed search term. Equality on the parsed value is what filter
/// deduplication compares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    term: String,
    case_sensitive: bool,
}

impl SearchTerm {
    /// Parses raw search box text. Surrounding double quotes switch on
    /// case-sensitive matching and are removed.
    pub fn parse(raw: &str) -> Self {
        let case_sensitive = raw.starts_with('"') && raw.ends_with('"') && !raw.is_empty();
        if case_sensitive {
            let term = if raw.len() >= 2 {
                raw[1..raw.len() - 1].to_string()
            } else {
                String::new()
            };
            Self {
                term,
                case_sensitive: true,
            }
        } else {
            Self {
                term: raw.to_lowercase(),
                case_sensitive: false,
            }
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// True if the term occurs in any string field reachable from the record.
    pub fn matches(&self, record: &Record) -> bool {
        self.matches_map(&record.fields)
    }

    fn matches_map(&self, fields: &Fields) -> bool {
        fields
            .iter()
            .filter(|(key, _)| !key.starts_with(PRIVATE_PREFIX))
            .any(|(_, value)| self.matches_value(value))
    }

    fn matches_value(&self, value: &Value) -> bool {
        match value {
            Value::Object(map) => map
                .iter()
                .filter(|(key, _)| !key.starts_with(PRIVATE_PREFIX))
                .any(|(_, v)| self.matches_value(v)),
            Value::Array(items) => items.iter().any(|v| self.matches_value(v)),
            Value::String(s) => {
                if self.case_sensitive {
                    s.contains(&self.term)
                } else {
                    s.to_lowercase().contains(&self.term)
                }
            }
            // Numbers, booleans and nulls never match.
            _ => false,
        }
    }
}

/// Search state: the last term entered, re-derived on every invocation.
#[derive(Debug, Default)]
pub struct Searcher {
    term: SearchTerm,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current term with newly parsed search box text.
    pub fn set_search(&mut self, raw: &str) {
        self.term = SearchTerm::parse(raw);
    }

    pub fn term(&self) -> &SearchTerm {
        &self.term
    }

    pub fn search(&self, record: &Record) -> bool {
        self.term.matches(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            Value::Object(map) => Record::new(0, map),
            _ => panic!("search fixture must be an object"),
        }
    }

    #[test]
    fn unquoted_term_matches_any_case() {
        let term = SearchTerm::parse("exact");
        assert!(term.matches(&record(json!({"a": "EXACT"}))));
        assert!(term.matches(&record(json!({"a": "Exact"}))));
        assert!(term.matches(&record(json!({"a": "prefix exact suffix"}))));
        assert!(!term.matches(&record(json!({"a": "other"}))));
    }

    #[test]
    fn quoted_term_is_case_sensitive() {
        let term = SearchTerm::parse("\"Exact\"");
        assert!(term.is_case_sensitive());
        assert_eq!(term.term(), "Exact");
        assert!(term.matches(&record(json!({"a": "Exact"}))));
        assert!(!term.matches(&record(json!({"a": "exact"}))));
        assert!(!term.matches(&record(json!({"a": "EXACT"}))));
    }

    #[test]
    fn descends_into_nested_maps_and_sequences() {
        let term = SearchTerm::parse("needle");
        assert!(term.matches(&record(json!({"outer": {"inner": "the needle"}}))));
        assert!(term.matches(&record(json!({"list": ["hay", ["deep", "needle"]]}))));
        assert!(!term.matches(&record(json!({"list": ["hay", "stack"]}))));
    }

    #[test]
    fn private_keys_skipped_at_every_level() {
        let term = SearchTerm::parse("needle");
        assert!(!term.matches(&record(json!({"_top": "needle"}))));
        assert!(!term.matches(&record(json!({"nested": {"_deep": "needle"}}))));
        assert!(term.matches(&record(json!({"nested": {"deep": "needle"}}))));
    }

    #[test]
    fn non_string_leaves_never_match() {
        let term = SearchTerm::parse("42");
        assert!(!term.matches(&record(json!({"n": 42, "b": true, "z": null}))));
        assert!(term.matches(&record(json!({"s": "42"}))));
    }

    #[test]
    fn empty_term_matches_any_string_leaf() {
        let term = SearchTerm::parse("");
        assert!(term.matches(&record(json!({"a": ""}))));
        assert!(term.matches(&record(json!({"a": "anything"}))));
        assert!(!term.matches(&record(json!({"a": 5}))));
    }

    #[test]
    fn searcher_rederives_term_on_each_set() {
        let mut searcher = Searcher::new();
        searcher.set_search("\"Case\"");
        assert!(searcher.term().is_case_sensitive());
        searcher.set_search("case");
        assert!(!searcher.term().is_case_sensitive());
        assert_eq!(searcher.term().term(), "case");
    }
}
