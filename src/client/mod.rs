//! Data access for the inspector.
//!
//! The server is a collaborator: it exposes one endpoint per record
//! collection, each returning a JSON array of objects. The [`DataClient`]
//! trait is the seam the tab coordinator drives; [`HttpDataClient`] talks to
//! a live server, [`MockDataClient`] serves canned data for demos and tests.

mod http;
mod mock;

pub use http::HttpDataClient;
pub use mock::MockDataClient;

use futures::future::LocalBoxFuture;

use crate::record::Fields;

/// Server collections the inspector can page through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Agents,
    Things,
    Issuants,
    Offers,
    Messages,
    AnonMsgs,
}

impl Collection {
    pub fn all() -> [Collection; 6] {
        [
            Collection::Agents,
            Collection::Things,
            Collection::Issuants,
            Collection::Offers,
            Collection::Messages,
            Collection::AnonMsgs,
        ]
    }

    /// URL path of the collection endpoint.
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Agents => "/agent",
            Collection::Things => "/thing",
            Collection::Issuants => "/issuant",
            Collection::Offers => "/offer",
            Collection::Messages => "/message",
            Collection::AnonMsgs => "/anon",
        }
    }
}

/// Error fetching one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub collection: Collection,
    pub message: String,
}

impl FetchError {
    pub fn new(collection: Collection, message: impl Into<String>) -> Self {
        Self {
            collection,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fetch {}: {}", self.collection.path(), self.message)
    }
}

impl std::error::Error for FetchError {}

/// Asynchronous access to server collections.
///
/// Fetches run on the single UI thread; futures are not `Send`.
pub trait DataClient {
    /// Fetches all records of a collection.
    fn fetch(&self, collection: Collection) -> LocalBoxFuture<'_, Result<Vec<Fields>, FetchError>>;
}
