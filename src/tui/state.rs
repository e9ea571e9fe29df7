//! UI-only state: active tab, input mode, per-tab cursors.
//!
//! Core table/search state lives in [`crate::tabs::Tabs`]; this module holds
//! what the terminal frontend needs on top of it.

use ratatui::widgets::TableState as RatatuiTableState;

use crate::tabs::TabKind;

/// Input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing in the search box.
    Search,
}

/// Cursor position within one tab's table.
#[derive(Debug, Default)]
pub struct TabCursor {
    pub selected: usize,
    pub ratatui_state: RatatuiTableState,
}

impl TabCursor {
    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        self.selected = self.selected.saturating_add(1);
    }

    pub fn page_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn page_down(&mut self, n: usize) {
        self.selected = self.selected.saturating_add(n);
    }

    pub fn home(&mut self) {
        self.selected = 0;
    }

    pub fn end(&mut self) {
        self.selected = usize::MAX;
    }

    /// Clamps the cursor to the row count and syncs ratatui state.
    pub fn resolve(&mut self, row_count: usize) {
        if row_count == 0 {
            self.selected = 0;
            self.ratatui_state.select(None);
        } else {
            self.selected = self.selected.min(row_count - 1);
            self.ratatui_state.select(Some(self.selected));
        }
    }
}

/// Terminal frontend state.
#[derive(Debug)]
pub struct UiState {
    /// Index into [`TabKind::all`] of the active tab.
    pub active: usize,
    pub input_mode: InputMode,
    /// Search box buffer.
    pub search_input: String,
    /// Last aggregate refresh error, shown in the header.
    pub last_error: Option<String>,
    pub cursors: Vec<TabCursor>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        let kinds = TabKind::all();
        let active = kinds.iter().position(|k| k.default_active()).unwrap_or(0);
        Self {
            active,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            last_error: None,
            cursors: kinds.iter().map(|_| TabCursor::default()).collect(),
        }
    }

    pub fn active_kind(&self) -> TabKind {
        TabKind::all()[self.active]
    }

    pub fn cursor_mut(&mut self) -> &mut TabCursor {
        &mut self.cursors[self.active]
    }
}
