//! Terminal User Interface for the identity server inspector.
//!
//! This module provides an interactive tabbed TUI for browsing the server's
//! collections, with per-tab search, sort, selection and details panels.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;

pub use app::App;
pub use state::{InputMode, UiState};
