//! Generic table core: data, filter, sort, display cap, selection.
//!
//! A table owns its records in insertion (= server) order and derives a
//! "shown" subsequence from them: an insertion-ordered filter pass capped at
//! [`MAX_SHOWN`] rows, followed by a stable sort pass when a sort column is
//! active. Selection is at most one record, toggled off by reselecting it.

use std::cmp::Ordering;

use serde_json::Value;
use tracing::debug;

use crate::field::Field;
use crate::record::{Fields, Record};
use crate::search::SearchTerm;
use crate::view::{ColumnView, Notice, TableView, ViewRow};

/// Maximum number of records shown regardless of filtering.
pub const MAX_SHOWN: usize = 1000;

/// Extracts the raw value of a field from a record. Tables with nested or
/// collection-valued server payloads install their own extractor.
pub type Extractor = fn(&Record, &Field) -> Value;

/// Default extraction: plain lookup by the field's key.
pub fn default_extract(record: &Record, field: &Field) -> Value {
    record.get(&field.key)
}

/// A table, its columns, and the records to be displayed.
pub struct Table {
    fields: Vec<Field>,
    extract: Extractor,
    data: Vec<Record>,
    /// Indices into `data`: filtered, capped, then sorted.
    shown: Vec<usize>,
    filter: Option<SearchTerm>,
    /// Index into `fields` of the active sort column.
    sort_field: Option<usize>,
    reversed: bool,
    selected: Option<u64>,
    detail_selected: String,
    max_size: usize,
}

impl Table {
    pub fn new(fields: Vec<Field>) -> Self {
        Self::with_extractor(fields, default_extract)
    }

    pub fn with_extractor(fields: Vec<Field>, extract: Extractor) -> Self {
        Self {
            fields,
            extract,
            data: Vec::new(),
            shown: Vec::new(),
            filter: None,
            sort_field: None,
            reversed: false,
            selected: None,
            detail_selected: String::new(),
            max_size: MAX_SHOWN,
        }
    }

    /// Number of records held.
    pub fn total(&self) -> usize {
        self.data.len()
    }

    /// Number of records not hidden by the filter or the display cap.
    pub fn shown(&self) -> usize {
        self.shown.len()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn sort_field(&self) -> Option<usize> {
        self.sort_field
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn selected_uid(&self) -> Option<u64> {
        self.selected
    }

    /// Serialized detail text of the selected record, empty when none.
    pub fn detail_selected(&self) -> &str {
        &self.detail_selected
    }

    /// Drops all records. The selection cannot survive since the selected
    /// record must always be a member of the data.
    pub fn clear(&mut self) {
        self.data.clear();
        self.shown.clear();
        self.selected = None;
        self.detail_selected.clear();
    }

    /// Replaces (or, with `clear == false`, appends to) the data set and
    /// re-derives the shown subsequence. Each incoming record is assigned a
    /// uid continuing from the current total.
    pub fn set_data(&mut self, batch: Vec<Fields>, clear: bool) {
        if clear {
            self.clear();
        }
        self.extend_data(batch);
        self.process();
    }

    /// Appends records without re-deriving the shown subsequence. Callers
    /// merging several batches call [`Table::process`] once at the end.
    pub fn extend_data(&mut self, batch: Vec<Fields>) {
        for fields in batch {
            let uid = self.data.len() as u64;
            self.data.push(Record::new(uid, fields));
        }
    }

    /// Replaces the filter. A filter equal to the current one is a no-op and
    /// does not re-derive the shown subsequence.
    pub fn set_filter(&mut self, filter: Option<SearchTerm>) {
        if filter == self.filter {
            return;
        }
        self.filter = filter;
        self.process();
    }

    /// Sorts on the given column. Sorting on the already-active column
    /// toggles the direction instead.
    pub fn set_sort(&mut self, field: usize) {
        if field >= self.fields.len() {
            return;
        }
        if self.sort_field == Some(field) {
            self.reversed = !self.reversed;
        } else {
            self.reversed = false;
            self.sort_field = Some(field);
        }
        self.sort_shown();
    }

    /// Re-derives the shown subsequence: accept records in insertion order,
    /// skipping filter rejections, until the display cap is reached; then
    /// apply the sort pass.
    pub fn process(&mut self) {
        self.shown.clear();
        for (idx, record) in self.data.iter().enumerate() {
            if self.shown.len() >= self.max_size {
                break;
            }
            if let Some(filter) = &self.filter
                && !filter.matches(record)
            {
                continue;
            }
            self.shown.push(idx);
        }
        debug!(total = self.data.len(), shown = self.shown.len(), "processed table data");
        self.sort_shown();
    }

    /// Stable sort of the shown subsequence by the active sort column.
    /// Equal keys keep their insertion order in both directions.
    fn sort_shown(&mut self) {
        let Some(field_idx) = self.sort_field else {
            return;
        };
        let field = &self.fields[field_idx];
        let extract = self.extract;
        let data = &self.data;
        let reversed = self.reversed;
        self.shown.sort_by(|&a, &b| {
            let ord = cmp_values(&extract(&data[a], field), &extract(&data[b], field));
            if reversed { ord.reverse() } else { ord }
        });
    }

    /// Toggles selection of the record with the given uid. Selecting the
    /// already-selected record clears the selection; selecting another moves
    /// it. The detail text follows the selection.
    pub fn select(&mut self, uid: u64) {
        if let Some(previous) = self.selected.take() {
            if let Some(record) = self.data.iter_mut().find(|r| r.uid == previous) {
                record.selected = false;
            }
            if previous == uid {
                self.detail_selected.clear();
                return;
            }
        }
        match self.data.iter_mut().find(|r| r.uid == uid) {
            Some(record) => {
                record.selected = true;
                self.detail_selected = record.detail_text();
                self.selected = Some(uid);
            }
            None => self.detail_selected.clear(),
        }
    }

    /// Builds the view model for the current shown subsequence.
    pub fn view(&self) -> TableView {
        let columns = self
            .fields
            .iter()
            .map(|f| ColumnView {
                title: f.title.clone(),
                width: f.length.max(f.title.len() as u16),
                fill: f.fill,
            })
            .collect();

        let rows = self
            .shown
            .iter()
            .map(|&idx| {
                let record = &self.data[idx];
                ViewRow {
                    uid: record.uid,
                    selected: record.selected,
                    cells: self
                        .fields
                        .iter()
                        .map(|f| f.cell(&(self.extract)(record, f)))
                        .collect(),
                }
            })
            .collect();

        let notice = if self.shown.len() >= self.max_size {
            Some(Notice::Limited(self.max_size))
        } else if self.shown.is_empty() {
            Some(Notice::NoResults)
        } else {
            None
        };

        TableView {
            columns,
            rows,
            notice,
            sort_column: self.sort_field,
            sort_reversed: self.reversed,
        }
    }
}

/// Total order over JSON values for sorting: null < bool < number < string
/// < array < object; numbers compare numerically, arrays element-wise.
fn cmp_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (xv, yv) in x.iter().zip(y.iter()) {
                let ord = cmp_values(xv, yv);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Notice;
    use serde_json::json;

    fn fields() -> Vec<Field> {
        vec![Field::text("Uid"), Field::text("Date")]
    }

    fn batch(rows: &[(&str, i64)]) -> Vec<Fields> {
        rows.iter()
            .map(|(uid, date)| match json!({"uid": uid, "date": date}) {
                Value::Object(map) => map,
                _ => unreachable!(),
            })
            .collect()
    }

    fn shown_uids(table: &Table) -> Vec<String> {
        table
            .view()
            .rows
            .iter()
            .map(|r| r.cells[0].text.clone())
            .collect()
    }

    #[test]
    fn set_data_with_clear_replaces_and_renumbers() {
        let mut table = Table::new(fields());
        table.set_data(batch(&[("a", 1), ("b", 2)]), true);
        table.set_data(batch(&[("c", 3), ("d", 4), ("e", 5)]), true);
        assert_eq!(table.total(), 3);
        let uids: Vec<u64> = table.view().rows.iter().map(|r| r.uid).collect();
        assert_eq!(uids, vec![0, 1, 2]);
    }

    #[test]
    fn non_clearing_batches_accumulate_with_increasing_uids() {
        let mut table = Table::new(fields());
        table.set_data(batch(&[("a", 1), ("b", 2), ("c", 3)]), false);
        table.set_data(batch(&[("d", 4), ("e", 5)]), false);
        assert_eq!(table.total(), 5);
        let uids: Vec<u64> = table.view().rows.iter().map(|r| r.uid).collect();
        assert_eq!(uids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn filter_keeps_insertion_ordered_prefix() {
        let mut table = Table::new(fields());
        table.set_data(batch(&[("ax", 1), ("b", 2), ("ay", 3), ("c", 4)]), true);
        table.set_filter(Some(SearchTerm::parse("a")));
        assert_eq!(shown_uids(&table), vec!["ax", "ay"]);
        assert_eq!(table.total(), 4);
        assert_eq!(table.shown(), 2);
    }

    #[test]
    fn equal_filter_is_a_no_op() {
        let mut table = Table::new(fields());
        table.set_data(batch(&[("a", 1)]), true);
        table.set_filter(Some(SearchTerm::parse("a")));
        // Append without reprocessing, then set an identical filter: the
        // shown subsequence must stay stale, proving no recompute happened.
        table.extend_data(batch(&[("ab", 2)]));
        table.set_filter(Some(SearchTerm::parse("a")));
        assert_eq!(shown_uids(&table), vec!["a"]);
        // A genuinely different filter recomputes.
        table.set_filter(Some(SearchTerm::parse("ab")));
        assert_eq!(shown_uids(&table), vec!["ab"]);
    }

    #[test]
    fn sort_ascending_then_toggle_reverses_order_only() {
        let mut table = Table::new(fields());
        table.set_data(batch(&[("a", 1), ("b", 3), ("c", 2)]), true);
        table.set_sort(1);
        assert_eq!(shown_uids(&table), vec!["a", "c", "b"]);
        table.set_sort(1);
        assert_eq!(shown_uids(&table), vec!["b", "c", "a"]);
        assert_eq!(table.shown(), 3);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut table = Table::new(fields());
        table.set_data(batch(&[("a", 2), ("b", 1), ("c", 2), ("d", 1)]), true);
        table.set_sort(1);
        assert_eq!(shown_uids(&table), vec!["b", "d", "a", "c"]);
        table.set_sort(1);
        // Descending keeps insertion order among ties too.
        assert_eq!(shown_uids(&table), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn switching_sort_field_resets_to_ascending() {
        let mut table = Table::new(fields());
        table.set_data(batch(&[("b", 1), ("a", 2)]), true);
        table.set_sort(1);
        table.set_sort(1); // descending on date
        table.set_sort(0); // new field: ascending again
        assert!(!table.is_reversed());
        assert_eq!(shown_uids(&table), vec!["a", "b"]);
    }

    #[test]
    fn selection_toggles_and_moves() {
        let mut table = Table::new(fields());
        table.set_data(batch(&[("a", 1), ("b", 2)]), true);

        table.select(0);
        assert_eq!(table.selected_uid(), Some(0));
        assert!(table.detail_selected().contains("\"a\""));
        assert!(table.view().rows[0].selected);

        // Selecting another record moves the selection.
        table.select(1);
        assert_eq!(table.selected_uid(), Some(1));
        assert!(!table.view().rows[0].selected);
        assert!(table.view().rows[1].selected);

        // Reselecting clears it.
        table.select(1);
        assert_eq!(table.selected_uid(), None);
        assert_eq!(table.detail_selected(), "");
        assert!(table.view().rows.iter().all(|r| !r.selected));
    }

    #[test]
    fn detail_text_omits_private_keys() {
        let mut table = Table::new(fields());
        let rows = vec![
            match json!({"uid": "a", "date": 1, "_raw": "hidden"}) {
                Value::Object(map) => map,
                _ => unreachable!(),
            },
        ];
        table.set_data(rows, true);
        table.select(0);
        assert!(!table.detail_selected().contains("_raw"));
        assert!(table.detail_selected().contains("\"uid\""));
    }

    #[test]
    fn display_cap_and_notice() {
        let mut table = Table::new(fields());
        let rows: Vec<(String, i64)> = (0..MAX_SHOWN + 5)
            .map(|i| (format!("r{}", i), i as i64))
            .collect();
        let borrowed: Vec<(&str, i64)> =
            rows.iter().map(|(s, d)| (s.as_str(), *d)).collect();
        table.set_data(batch(&borrowed), true);
        assert_eq!(table.total(), MAX_SHOWN + 5);
        assert_eq!(table.shown(), MAX_SHOWN);
        assert_eq!(table.view().notice, Some(Notice::Limited(MAX_SHOWN)));
    }

    #[test]
    fn empty_shown_notice() {
        let mut table = Table::new(fields());
        table.set_data(batch(&[("a", 1)]), true);
        table.set_filter(Some(SearchTerm::parse("zzz")));
        assert_eq!(table.view().notice, Some(Notice::NoResults));
        assert!(table.view().rows.is_empty());
    }

    #[test]
    fn mixed_value_sort_orders_null_first() {
        let mut table = Table::new(fields());
        let rows = vec![
            match json!({"uid": "a", "date": "text"}) {
                Value::Object(map) => map,
                _ => unreachable!(),
            },
            match json!({"uid": "b"}) {
                Value::Object(map) => map,
                _ => unreachable!(),
            },
            match json!({"uid": "c", "date": 5}) {
                Value::Object(map) => map,
                _ => unreachable!(),
            },
        ];
        table.set_data(rows, true);
        table.set_sort(1);
        assert_eq!(shown_uids(&table), vec!["b", "c", "a"]);
    }
}
