//! UI-agnostic view model types.
//!
//! The table core produces these; the TUI maps them to ratatui widgets.
//! A different frontend would map them to its own cell/row primitives.

/// A single table cell, already formatted for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCell {
    pub text: String,
}

impl ViewCell {
    pub fn plain(text: String) -> Self {
        Self { text }
    }
}

/// One table row.
#[derive(Debug, Clone)]
pub struct ViewRow {
    /// Synthetic record id, stable for the lifetime of the current data set.
    pub uid: u64,
    pub selected: bool,
    pub cells: Vec<ViewCell>,
}

/// Column header metadata.
#[derive(Debug, Clone)]
pub struct ColumnView {
    pub title: String,
    /// Advisory display width in characters.
    pub width: u16,
    /// Column should take the remaining horizontal space.
    pub fill: bool,
}

/// Trailing notice shown in place of (or after) data rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The display cap was reached; only the first `n` accepted rows are shown.
    Limited(usize),
    /// Nothing matched the current data/filter.
    NoResults,
}

impl Notice {
    pub fn text(&self) -> String {
        match self {
            Notice::Limited(n) => format!("Limited to {} results.", n),
            Notice::NoResults => "No results found.".to_string(),
        }
    }
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone)]
pub struct TableView {
    pub columns: Vec<ColumnView>,
    pub rows: Vec<ViewRow>,
    pub notice: Option<Notice>,
    /// Index of the active sort column, if any.
    pub sort_column: Option<usize>,
    /// True when sorting descending.
    pub sort_reversed: bool,
}
