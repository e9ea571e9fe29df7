//! Tab definitions and the refresh/search coordinator.
//!
//! Each tab pairs one table with menu metadata and a details/copied panel.
//! The [`Tabs`] coordinator owns all of them, runs the per-table refreshes
//! concurrently with an at-most-one-in-flight guard, and routes search input
//! to either every table or just the active one.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared, join, join_all};
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{Collection, DataClient, FetchError};
use crate::field::Field;
use crate::record::Record;
use crate::search::Searcher;
use crate::table::{Table, default_extract};

/// Identifies one inspector tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    Entities,
    Issuants,
    Offers,
    Messages,
    AnonMsgs,
}

impl TabKind {
    pub fn all() -> [TabKind; 5] {
        [
            TabKind::Entities,
            TabKind::Issuants,
            TabKind::Offers,
            TabKind::Messages,
            TabKind::AnonMsgs,
        ]
    }

    /// Friendly name shown in the tab menu.
    pub fn name(&self) -> &'static str {
        match self {
            TabKind::Entities => "Entities",
            TabKind::Issuants => "Issuants",
            TabKind::Offers => "Offers",
            TabKind::Messages => "Messages",
            TabKind::AnonMsgs => "Anon Msgs",
        }
    }

    /// Stable identifier (also used for log context).
    pub fn slug(&self) -> &'static str {
        match self {
            TabKind::Entities => "entities",
            TabKind::Issuants => "issuants",
            TabKind::Offers => "offers",
            TabKind::Messages => "messages",
            TabKind::AnonMsgs => "anonmsgs",
        }
    }

    /// Tab displayed on startup.
    pub fn default_active(&self) -> bool {
        matches!(self, TabKind::Entities)
    }

    /// Builds the tab's table: its fixed column list plus the extractor
    /// handling its payload quirks.
    fn table(&self) -> Table {
        match self {
            TabKind::Entities => Table::with_extractor(
                vec![
                    Field::did("DID"),
                    Field::hid(),
                    Field::did("Signer"),
                    Field::date("Changed"),
                    Field::text("Issuants"),
                    Field::fill("Data"),
                    Field::text("Keys"),
                ],
                entities_extract,
            ),
            TabKind::Issuants => Table::with_extractor(
                vec![
                    Field::did("DID"),
                    Field::text("Kind"),
                    Field::fill("Issuer"),
                    Field::date("Registered"),
                    Field::fill("URL"),
                ],
                issuants_extract,
            ),
            TabKind::Offers => Table::new(vec![
                Field::id("UID", "o_"),
                Field::did("Thing"),
                Field::did("Aspirant"),
                Field::text("Duration").with_length(5),
                Field::date("Expiration"),
                Field::did("Signer"),
                Field::did("Offerer"),
            ]),
            TabKind::Messages => Table::new(vec![
                Field::id("UID", "m_"),
                Field::text("Kind").with_length(8),
                Field::date("Date"),
                Field::did("To"),
                Field::did("From"),
                Field::did("Thing"),
                Field::text("Subject").with_length(10),
                Field::fill("Content"),
            ]),
            TabKind::AnonMsgs => Table::with_extractor(
                vec![
                    Field::id("UID", ""),
                    Field::date("Date"),
                    Field::epoch("Created"),
                    Field::epoch("Expire"),
                    Field::fill("Content"),
                ],
                anon_msgs_extract,
            ),
        }
    }
}

/// Entities collapse collection-valued fields to counts and join the data
/// sub-object's keywords and message into one searchable display value.
fn entities_extract(record: &Record, field: &Field) -> Value {
    match field.key.as_str() {
        "issuants" | "keys" => match record.get(&field.key) {
            Value::Array(items) if !items.is_empty() => Value::from(items.len()),
            _ => Value::String(String::new()),
        },
        "data" => {
            let data = record.get("data");
            let keywords: Vec<&str> = data
                .get("keywords")
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            let message = data.get("message").and_then(Value::as_str).unwrap_or("");
            if keywords.is_empty() || message.is_empty() {
                Value::String(String::new())
            } else {
                Value::String(format!("{} {}", keywords.join(" "), message))
            }
        }
        _ => default_extract(record, field),
    }
}

/// Issuants expose their URL under `validationURL`.
fn issuants_extract(record: &Record, field: &Field) -> Value {
    match field.key.as_str() {
        "url" => record.get("validationURL"),
        _ => default_extract(record, field),
    }
}

/// Anon messages carry uid/date/content in a nested `anon` sub-object and
/// the creation time under `create`.
fn anon_msgs_extract(record: &Record, field: &Field) -> Value {
    match field.key.as_str() {
        "uid" | "date" | "content" => record
            .get("anon")
            .get(&field.key)
            .cloned()
            .unwrap_or(Value::Null),
        "created" => record.get("create"),
        _ => default_extract(record, field),
    }
}

/// One tab: a table plus its details/copied panel state.
pub struct TabledTab {
    pub kind: TabKind,
    pub table: Rc<RefCell<Table>>,
    copied_details: String,
}

impl TabledTab {
    fn new(kind: TabKind) -> Self {
        Self {
            kind,
            table: Rc::new(RefCell::new(kind.table())),
            copied_details: String::new(),
        }
    }

    /// "shown/total" label next to the menu entry.
    pub fn menu_label(&self) -> String {
        let table = self.table.borrow();
        format!("{}/{}", table.shown(), table.total())
    }

    /// Copies the current selection's detail text to the copied panel.
    pub fn copy_details(&mut self) {
        self.copied_details = self.table.borrow().detail_selected().to_string();
    }

    pub fn clear_copy(&mut self) {
        self.copied_details.clear();
    }

    pub fn copied_details(&self) -> &str {
        &self.copied_details
    }
}

/// Shared handle to an in-flight (or settled) aggregate refresh.
pub type RefreshHandle = Shared<LocalBoxFuture<'static, Result<(), FetchError>>>;

/// Owns the tab set and coordinates refresh and search across it.
pub struct Tabs<C: DataClient + 'static> {
    client: Rc<C>,
    tabs: Vec<TabledTab>,
    searcher: Searcher,
    refreshing: Rc<Cell<bool>>,
    pending: Option<RefreshHandle>,
}

impl<C: DataClient + 'static> Tabs<C> {
    pub fn new(client: Rc<C>) -> Self {
        Self {
            client,
            tabs: TabKind::all().into_iter().map(TabledTab::new).collect(),
            searcher: Searcher::new(),
            refreshing: Rc::new(Cell::new(false)),
            pending: None,
        }
    }

    pub fn tabs(&self) -> &[TabledTab] {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut [TabledTab] {
        &mut self.tabs
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    /// True while an aggregate refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.get()
    }

    /// Starts an aggregate refresh of every table, or returns the pending
    /// handle when one is already in flight. All per-table refreshes run
    /// concurrently; the aggregate settles once every one of them has,
    /// reporting the first error. The in-flight guard clears on success and
    /// failure alike, so a retry is always possible.
    pub fn refresh(&mut self) -> RefreshHandle {
        if self.refreshing.get()
            && let Some(pending) = &self.pending
        {
            debug!("refresh already in flight, returning pending handle");
            return pending.clone();
        }
        self.refreshing.set(true);

        let futures: Vec<_> = self
            .tabs
            .iter()
            .map(|tab| refresh_table(Rc::clone(&self.client), tab.kind, Rc::clone(&tab.table)))
            .collect();

        let refreshing = Rc::clone(&self.refreshing);
        let handle = async move {
            let results = join_all(futures).await;
            refreshing.set(false);
            match results.into_iter().find_map(Result::err) {
                Some(err) => {
                    warn!(%err, "refresh finished with errors");
                    Err(err)
                }
                None => {
                    debug!("refresh finished");
                    Ok(())
                }
            }
        }
        .boxed_local()
        .shared();

        self.pending = Some(handle.clone());
        handle
    }

    /// Applies the current search box text as a filter on every table.
    pub fn search_all(&mut self, query: &str) {
        self.searcher.set_search(query);
        let term = self.searcher.term().clone();
        for tab in &self.tabs {
            tab.table.borrow_mut().set_filter(Some(term.clone()));
        }
    }

    /// Applies the search only to the active tab's table and clears the
    /// filter everywhere else. Empty text clears the active one too.
    pub fn search_current(&mut self, query: &str, active: TabKind) {
        self.searcher.set_search(query);
        let term = self.searcher.term().clone();
        for tab in &self.tabs {
            let filter = if !query.is_empty() && tab.kind == active {
                Some(term.clone())
            } else {
                None
            };
            tab.table.borrow_mut().set_filter(filter);
        }
    }
}

/// Refreshes one tab's table from the server. The table is cleared up front,
/// so it renders empty while the fetch is in flight and stays empty when the
/// fetch fails.
///
/// The entities tab is composite: agents and things are fetched concurrently
/// and merged into the same table without clearing in between, and the shown
/// subsequence is derived once after both have settled. On partial failure
/// the batch that did arrive is kept and the error propagated.
async fn refresh_table<C: DataClient>(
    client: Rc<C>,
    kind: TabKind,
    table: Rc<RefCell<Table>>,
) -> Result<(), FetchError> {
    match kind {
        TabKind::Entities => {
            table.borrow_mut().clear();
            let (agents, things) = join(
                client.fetch(Collection::Agents),
                client.fetch(Collection::Things),
            )
            .await;

            let mut table = table.borrow_mut();
            let mut first_err = None;
            for result in [agents, things] {
                match result {
                    Ok(batch) => table.extend_data(batch),
                    Err(err) => {
                        if first_err.is_none() {
                            first_err = Some(err);
                        }
                    }
                }
            }
            table.process();
            match first_err {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
        TabKind::Issuants | TabKind::Offers | TabKind::Messages | TabKind::AnonMsgs => {
            let collection = match kind {
                TabKind::Issuants => Collection::Issuants,
                TabKind::Offers => Collection::Offers,
                TabKind::Messages => Collection::Messages,
                _ => Collection::AnonMsgs,
            };
            table.borrow_mut().clear();
            let batch = client.fetch(collection).await?;
            table.borrow_mut().set_data(batch, false);
            Ok(())
        }
    }
}
