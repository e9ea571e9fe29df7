//! Canned data client for demos and tests.

use std::collections::HashMap;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use serde_json::{Value, json};

use super::{Collection, DataClient, FetchError};
use crate::record::Fields;

/// In-memory client serving fixed per-collection results.
#[derive(Debug, Default)]
pub struct MockDataClient {
    collections: HashMap<Collection, Vec<Fields>>,
    failures: HashMap<Collection, String>,
}

impl MockDataClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the records returned for a collection. `rows` must be a JSON
    /// array of objects, as the server would send.
    pub fn insert(&mut self, collection: Collection, rows: Value) -> &mut Self {
        let batch = match rows {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        self.collections.insert(collection, batch);
        self
    }

    /// Makes fetches of a collection fail with the given message.
    pub fn fail(&mut self, collection: Collection, message: &str) -> &mut Self {
        self.failures.insert(collection, message.to_string());
        self
    }

    /// A small plausible data set covering every collection.
    pub fn sample() -> Self {
        let mut mock = Self::new();
        mock.insert(
            Collection::Agents,
            json!([
                {
                    "did": "did:igo:Qt27fThWoNZsa88VrTkep6H-4HA8tr54sHON1vWl6FE=",
                    "hid": "",
                    "signer": "did:igo:Qt27fThWoNZsa88VrTkep6H-4HA8tr54sHON1vWl6FE=#0",
                    "changed": "2000-01-01T00:00:00+00:00",
                    "issuants": [
                        {"kind": "dns", "issuer": "generic.com", "registered": "2000-01-01T00:00:00+00:00"}
                    ],
                    "keys": [{"key": "Qt27fThWoNZsa88VrTkep6H-4HA8tr54sHON1vWl6FE=", "kind": "EdDSA"}]
                },
                {
                    "did": "did:igo:dZ74MLZXD-1QHoa73w9pQ9GroAvxqFi2RTZWlkC0raY=",
                    "hid": "",
                    "signer": "did:igo:dZ74MLZXD-1QHoa73w9pQ9GroAvxqFi2RTZWlkC0raY=#0",
                    "changed": "2000-01-02T00:00:00+00:00",
                    "issuants": [],
                    "keys": [{"key": "dZ74MLZXD-1QHoa73w9pQ9GroAvxqFi2RTZWlkC0raY=", "kind": "EdDSA"}]
                }
            ]),
        );
        mock.insert(
            Collection::Things,
            json!([
                {
                    "did": "did:igo:4JCM8dJWw_O57vM4kAtTt0yWqSgBuwiHpVgd55BioCM=",
                    "hid": "hid:dns:generic.com#02",
                    "signer": "did:igo:Qt27fThWoNZsa88VrTkep6H-4HA8tr54sHON1vWl6FE=#0",
                    "changed": "2000-01-03T00:00:00+00:00",
                    "data": {"keywords": ["Wheel", "Chrome"], "message": "Lightweight alloy wheel."}
                }
            ]),
        );
        mock.insert(
            Collection::Issuants,
            json!([
                {
                    "did": "did:igo:Qt27fThWoNZsa88VrTkep6H-4HA8tr54sHON1vWl6FE=",
                    "kind": "dns",
                    "issuer": "generic.com",
                    "registered": "2000-01-01T00:00:00+00:00",
                    "validationURL": "https://generic.com/indigo"
                }
            ]),
        );
        mock.insert(
            Collection::Offers,
            json!([
                {
                    "uid": "o_00035d2976e6a000_26ace93",
                    "thing": "did:igo:4JCM8dJWw_O57vM4kAtTt0yWqSgBuwiHpVgd55BioCM=",
                    "aspirant": "did:igo:dZ74MLZXD-1QHoa73w9pQ9GroAvxqFi2RTZWlkC0raY=",
                    "duration": 120.0,
                    "expiration": "2000-01-01T00:22:00+00:00",
                    "signer": "did:igo:Qt27fThWoNZsa88VrTkep6H-4HA8tr54sHON1vWl6FE=#0",
                    "offerer": "did:igo:Qt27fThWoNZsa88VrTkep6H-4HA8tr54sHON1vWl6FE=#0"
                }
            ]),
        );
        mock.insert(
            Collection::Messages,
            json!([
                {
                    "uid": "m_00035d3d94be0000_15aabb5",
                    "kind": "found",
                    "date": "2000-01-04T00:00:00+00:00",
                    "to": "did:igo:Qt27fThWoNZsa88VrTkep6H-4HA8tr54sHON1vWl6FE=",
                    "from": "did:igo:dZ74MLZXD-1QHoa73w9pQ9GroAvxqFi2RTZWlkC0raY=",
                    "thing": "did:igo:4JCM8dJWw_O57vM4kAtTt0yWqSgBuwiHpVgd55BioCM=",
                    "subject": "Lose something?",
                    "content": "Found your thing at the park."
                }
            ]),
        );
        mock.insert(
            Collection::AnonMsgs,
            json!([
                {
                    "create": 1507064140186i64,
                    "expire": 1507150540186i64,
                    "anon": {
                        "uid": "AQIDAQoKCQg=",
                        "content": "EjRWeBI0Vng=",
                        "date": "2017-10-03T20:55:45.186082+00:00"
                    }
                }
            ]),
        );
        mock
    }
}

impl DataClient for MockDataClient {
    fn fetch(&self, collection: Collection) -> LocalBoxFuture<'_, Result<Vec<Fields>, FetchError>> {
        let result = match self.failures.get(&collection) {
            Some(message) => Err(FetchError::new(collection, message.clone())),
            None => Ok(self.collections.get(&collection).cloned().unwrap_or_default()),
        };
        async move { result }.boxed_local()
    }
}
