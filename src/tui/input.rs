//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{InputMode, UiState};
use crate::tabs::TabKind;

/// Result of handling a key event that the app loop must act on.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Trigger an aggregate refresh.
    Refresh,
    /// Toggle selection of the row under the cursor.
    ToggleSelect,
    /// Copy the details panel into the copied panel.
    CopyDetails,
    /// Clear the copied panel.
    ClearCopied,
    /// Sort on the next / previous column.
    SortNext,
    SortPrev,
    /// Re-apply sort on the current column, toggling direction.
    SortToggle,
    /// Apply the search box to the current tab only.
    SearchCurrent,
    /// Apply the search box to all tabs.
    SearchAll,
}

const PAGE: usize = 10;

/// Handles one key event, mutating UI-local state directly and returning
/// an action for anything that touches the tables.
pub fn handle_key(state: &mut UiState, key: KeyEvent) -> KeyAction {
    match state.input_mode {
        InputMode::Search => handle_search_key(state, key),
        InputMode::Normal => handle_normal_key(state, key),
    }
}

fn handle_search_key(state: &mut UiState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            state.input_mode = InputMode::Normal;
            KeyAction::None
        }
        KeyCode::Enter => {
            state.input_mode = InputMode::Normal;
            if key.modifiers.contains(KeyModifiers::ALT) {
                KeyAction::SearchAll
            } else {
                KeyAction::SearchCurrent
            }
        }
        KeyCode::Backspace => {
            state.search_input.pop();
            KeyAction::None
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.search_input.push(c);
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_normal_key(state: &mut UiState, key: KeyEvent) -> KeyAction {
    let tab_count = TabKind::all().len();
    match key.code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        KeyCode::Char('r') => KeyAction::Refresh,

        KeyCode::Tab => {
            state.active = (state.active + 1) % tab_count;
            KeyAction::None
        }
        KeyCode::BackTab => {
            state.active = (state.active + tab_count - 1) % tab_count;
            KeyAction::None
        }
        KeyCode::Char(c @ '1'..='5') => {
            state.active = (c as usize) - ('1' as usize);
            KeyAction::None
        }

        KeyCode::Up | KeyCode::Char('k') => {
            state.cursor_mut().select_up();
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.cursor_mut().select_down();
            KeyAction::None
        }
        KeyCode::PageUp => {
            state.cursor_mut().page_up(PAGE);
            KeyAction::None
        }
        KeyCode::PageDown => {
            state.cursor_mut().page_down(PAGE);
            KeyAction::None
        }
        KeyCode::Home => {
            state.cursor_mut().home();
            KeyAction::None
        }
        KeyCode::End => {
            state.cursor_mut().end();
            KeyAction::None
        }

        KeyCode::Enter => KeyAction::ToggleSelect,
        KeyCode::Char('c') => KeyAction::CopyDetails,
        KeyCode::Char('x') => KeyAction::ClearCopied,

        KeyCode::Char('>') => KeyAction::SortNext,
        KeyCode::Char('<') => KeyAction::SortPrev,
        KeyCode::Char('s') => KeyAction::SortToggle,

        KeyCode::Char('/') => {
            state.input_mode = InputMode::Search;
            state.search_input.clear();
            KeyAction::None
        }

        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        let mut event = KeyEvent::new(code, modifiers);
        event.kind = KeyEventKind::Press;
        event
    }

    #[test]
    fn digits_switch_tabs() {
        let mut state = UiState::new();
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('3'))), KeyAction::None);
        assert_eq!(state.active_kind(), TabKind::Offers);
    }

    #[test]
    fn search_mode_collects_text_and_submits() {
        let mut state = UiState::new();
        handle_key(&mut state, key(KeyCode::Char('/')));
        assert_eq!(state.input_mode, InputMode::Search);

        for c in "abc".chars() {
            handle_key(&mut state, key(KeyCode::Char(c)));
        }
        handle_key(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.search_input, "ab");

        let action = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(action, KeyAction::SearchCurrent);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn alt_enter_searches_all_tabs() {
        let mut state = UiState::new();
        handle_key(&mut state, key(KeyCode::Char('/')));
        let action = handle_key(&mut state, key_with(KeyCode::Enter, KeyModifiers::ALT));
        assert_eq!(action, KeyAction::SearchAll);
    }

    #[test]
    fn quit_keys() {
        let mut state = UiState::new();
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(
            handle_key(&mut state, key_with(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
    }
}
