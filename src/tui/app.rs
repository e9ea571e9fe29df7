//! Main TUI application.

use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::FutureExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::client::DataClient;
use crate::tabs::{RefreshHandle, Tabs};

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::UiState;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Main TUI application.
pub struct App<C: DataClient + 'static> {
    tabs: Tabs<C>,
    state: UiState,
    should_quit: bool,
    /// Periodic refresh interval, `None` for manual-only refresh.
    auto_refresh: Option<Duration>,
    last_refresh: Instant,
    /// Handle of the most recently started refresh, drained for its error.
    pending: Option<RefreshHandle>,
}

impl<C: DataClient + 'static> App<C> {
    /// Creates a new App with the given data client.
    pub fn new(client: Rc<C>, auto_refresh: Option<Duration>) -> Self {
        Self {
            tabs: Tabs::new(client),
            state: UiState::new(),
            should_quit: false,
            auto_refresh,
            last_refresh: Instant::now(),
            pending: None,
        }
    }

    /// Runs the TUI application until quit.
    pub async fn run(mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut events = EventHandler::new(TICK_RATE);

        // Initial data fetch
        self.start_refresh();

        // Main loop
        loop {
            self.drain_refresh();

            terminal.draw(|frame| render(frame, &mut self.state, &self.tabs))?;

            match events.next().await {
                Some(Event::Tick) => {
                    if let Some(interval) = self.auto_refresh
                        && self.last_refresh.elapsed() >= interval
                    {
                        self.start_refresh();
                    }
                }
                Some(Event::Key(key)) => {
                    let action = handle_key(&mut self.state, key);
                    self.apply(action);
                }
                Some(Event::Resize) => {}
                None => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        info!("exited");
        Ok(())
    }

    /// Starts an aggregate refresh, keeping the handle so its error can be
    /// surfaced in the header once it settles.
    fn start_refresh(&mut self) {
        self.last_refresh = Instant::now();
        let handle = self.tabs.refresh();
        // The shared handle is cloned onto the local set so the fetches make
        // progress while the loop waits on events.
        tokio::task::spawn_local(handle.clone());
        self.pending = Some(handle);
    }

    /// Picks up the result of a settled refresh without blocking the loop.
    fn drain_refresh(&mut self) {
        if self.tabs.is_refreshing() {
            return;
        }
        if let Some(handle) = self.pending.take()
            && let Some(result) = handle.now_or_never()
        {
            self.state.last_error = result.err().map(|err| err.to_string());
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::None => {}
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Refresh => self.start_refresh(),
            KeyAction::ToggleSelect => self.toggle_select(),
            KeyAction::CopyDetails => {
                self.tabs.tabs_mut()[self.state.active].copy_details();
            }
            KeyAction::ClearCopied => {
                self.tabs.tabs_mut()[self.state.active].clear_copy();
            }
            KeyAction::SortNext => self.sort_step(1),
            KeyAction::SortPrev => self.sort_step(-1),
            KeyAction::SortToggle => {
                let table = &self.tabs.tabs()[self.state.active].table;
                let field = table.borrow().sort_field().unwrap_or(0);
                table.borrow_mut().set_sort(field);
            }
            KeyAction::SearchCurrent => {
                let query = self.state.search_input.clone();
                let active = self.state.active_kind();
                self.tabs.search_current(&query, active);
            }
            KeyAction::SearchAll => {
                let query = self.state.search_input.clone();
                self.tabs.search_all(&query);
            }
        }
    }

    /// Toggles the details selection of the row under the cursor.
    fn toggle_select(&mut self) {
        let table = Rc::clone(&self.tabs.tabs()[self.state.active].table);
        let uid = {
            let view = table.borrow().view();
            let cursor = self.state.cursor_mut();
            cursor.resolve(view.rows.len());
            view.rows.get(cursor.selected).map(|row| row.uid)
        };
        if let Some(uid) = uid {
            table.borrow_mut().select(uid);
        }
    }

    /// Moves the sort column by one in either direction, wrapping around.
    fn sort_step(&mut self, step: isize) {
        let table = &self.tabs.tabs()[self.state.active].table;
        let count = table.borrow().fields().len() as isize;
        if count == 0 {
            return;
        }
        let next = match table.borrow().sort_field() {
            Some(current) => (current as isize + step).rem_euclid(count) as usize,
            None => {
                if step >= 0 {
                    0
                } else {
                    (count - 1) as usize
                }
            }
        };
        table.borrow_mut().set_sort(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockDataClient;
    use serde_json::{Value, json};
    use tokio::task::LocalSet;

    fn app_with_data() -> App<MockDataClient> {
        let mut app = App::new(Rc::new(MockDataClient::new()), None);
        let rows: Vec<_> = ["b", "a", "c"]
            .iter()
            .map(|kind| match json!({"kind": kind}) {
                Value::Object(map) => map,
                _ => unreachable!(),
            })
            .collect();
        app.tabs.tabs()[app.state.active]
            .table
            .borrow_mut()
            .set_data(rows, true);
        app
    }

    #[test]
    fn toggle_select_targets_row_under_cursor() {
        let mut app = app_with_data();
        app.state.cursor_mut().select_down();
        app.apply(KeyAction::ToggleSelect);

        let table = Rc::clone(&app.tabs.tabs()[app.state.active].table);
        assert_eq!(table.borrow().selected_uid(), Some(1));

        // A second toggle on the same row deselects.
        app.apply(KeyAction::ToggleSelect);
        assert_eq!(table.borrow().selected_uid(), None);
    }

    #[test]
    fn sort_step_wraps_and_toggle_reverses() {
        let mut app = app_with_data();
        let table = Rc::clone(&app.tabs.tabs()[app.state.active].table);
        let count = table.borrow().fields().len();

        app.apply(KeyAction::SortPrev);
        assert_eq!(table.borrow().sort_field(), Some(count - 1));

        app.apply(KeyAction::SortNext);
        assert_eq!(table.borrow().sort_field(), Some(0));
        assert!(!table.borrow().is_reversed());

        app.apply(KeyAction::SortToggle);
        assert!(table.borrow().is_reversed());

        // Stepping to another column resets to ascending.
        app.apply(KeyAction::SortNext);
        assert_eq!(table.borrow().sort_field(), Some(1));
        assert!(!table.borrow().is_reversed());
    }

    #[tokio::test]
    async fn refresh_error_surfaces_in_header() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let mut client = MockDataClient::sample();
                client.fail(crate::client::Collection::Offers, "boom");
                let mut app = App::new(Rc::new(client), None);

                app.start_refresh();
                let handle = app.pending.clone().unwrap();
                let _ = handle.await;

                app.drain_refresh();
                let error = app.state.last_error.unwrap();
                assert!(error.contains("boom"));
            })
            .await;
    }
}
