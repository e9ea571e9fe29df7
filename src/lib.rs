//! Terminal inspector for an identity server's collections.
//!
//! Fetches agents, things, issuants, offers and messages over the server's
//! HTTP API and presents them in sortable, searchable tables:
//!
//! - [`record`] / [`field`]: rows and column definitions
//! - [`table`]: the filter/sort/selection core
//! - [`search`]: search-term parsing and matching
//! - [`tabs`]: the tab set and refresh/search coordinator
//! - [`client`]: the HTTP client and its mock counterpart
//! - [`view`]: UI-agnostic view models
//! - [`tui`]: the ratatui frontend

pub mod client;
pub mod field;
pub mod record;
pub mod search;
pub mod table;
pub mod tabs;
pub mod tui;
pub mod view;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
