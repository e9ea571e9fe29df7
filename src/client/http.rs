//! reqwest-backed data client.

use std::time::Duration;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use serde_json::Value;
use tracing::{debug, warn};

use super::{Collection, DataClient, FetchError};
use crate::record::Fields;

/// Fetches collections from a live server over HTTP.
///
/// Every request carries a bounded timeout; a slow backend surfaces as a
/// fetch error, never as a hang.
pub struct HttpDataClient {
    base: String,
    client: reqwest::Client,
}

impl HttpDataClient {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn fetch_collection(&self, collection: Collection) -> Result<Vec<Fields>, FetchError> {
        let url = format!("{}{}?all=true", self.base, collection.path());
        debug!(%url, "fetching collection");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError::new(collection, e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchError::new(collection, e.to_string()))?;

        let Value::Array(items) = body else {
            return Err(FetchError::new(collection, "expected a JSON array"));
        };

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Object(map) => records.push(map),
                other => {
                    warn!(path = collection.path(), "skipping non-object item: {}", other);
                }
            }
        }
        debug!(path = collection.path(), count = records.len(), "fetched collection");
        Ok(records)
    }
}

impl DataClient for HttpDataClient {
    fn fetch(&self, collection: Collection) -> LocalBoxFuture<'_, Result<Vec<Fields>, FetchError>> {
        self.fetch_collection(collection).boxed_local()
    }
}
