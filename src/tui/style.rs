//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Color palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;

    pub const HEADER_BG: Color = Color::Blue;
    pub const HEADER_FG: Color = Color::White;

    pub const TAB_ACTIVE: Color = Color::Cyan;
    pub const TAB_INACTIVE: Color = Color::DarkGray;

    pub const CURSOR_BG: Color = Color::DarkGray;
    pub const SELECTED_FG: Color = Color::Green;
    pub const ERROR_FG: Color = Color::Red;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header row style.
    pub fn table_header() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }

    /// Row under the cursor.
    pub fn cursor() -> Style {
        Style::default().bg(Theme::CURSOR_BG)
    }

    /// Row whose record is selected for the details panel.
    pub fn selected_row() -> Style {
        Style::default()
            .fg(Theme::SELECTED_FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_active() -> Style {
        Style::default()
            .fg(Theme::TAB_ACTIVE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive() -> Style {
        Style::default().fg(Theme::TAB_INACTIVE)
    }

    /// Dimmed text (labels, notices).
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    pub fn error() -> Style {
        Style::default().fg(Theme::ERROR_FG)
    }
}
