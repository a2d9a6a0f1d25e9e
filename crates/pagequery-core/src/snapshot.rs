//! Per-render data snapshots
//!
//! A snapshot maps query identifiers to the results the data-loading
//! subsystem fetched for them. It is built by whichever harness owns the
//! render scope and is only ever read here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::errors::{QueryError, Result};
use crate::query_id::QueryId;

/// Resolved result of a query; never inspected by the runtime
pub type Payload = serde_json::Value;

/// One snapshot entry, `{ "data": ... }` on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub data: Option<Payload>,
}

impl QueryResult {
    /// Entry carrying a payload
    pub fn new(data: Payload) -> Self {
        Self { data: Some(data) }
    }

    /// Entry registered for a query whose data has not arrived
    pub fn empty() -> Self {
        Self { data: None }
    }

    /// The payload, if there is one; a JSON `null` counts as absent
    pub fn payload(&self) -> Option<&Payload> {
        self.data.as_ref().filter(|data| !data.is_null())
    }
}

/// Mapping from query identifier to query result for one render scope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSnapshot {
    entries: HashMap<String, QueryResult>,
}

impl DataSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion used by render harnesses
    pub fn with_entry(mut self, id: impl Into<QueryId>, result: QueryResult) -> Self {
        self.insert(id, result);
        self
    }

    /// Insert or replace an entry
    ///
    /// Only the harness that owns the scope calls this, before the snapshot
    /// is handed to a registry or scope.
    pub fn insert(&mut self, id: impl Into<QueryId>, result: QueryResult) {
        let id: QueryId = id.into();
        self.entries.insert(id.into(), result);
    }

    /// Entry by raw key
    pub fn get(&self, key: &str) -> Option<&QueryResult> {
        self.entries.get(key)
    }

    /// Payload for a validated identifier
    pub fn payload(&self, id: &QueryId) -> Option<&Payload> {
        self.get(id.as_str()).and_then(QueryResult::payload)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys present in the snapshot, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Parse the JSON form `{"<id>": {"data": ...}, ...}`
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the text is not a JSON object of results.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot file written by the data-loading subsystem
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Serialization` if it
    /// does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| QueryError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }
}

impl FromIterator<(QueryId, QueryResult)> for DataSnapshot {
    fn from_iter<I: IntoIterator<Item = (QueryId, QueryResult)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(id, result)| (String::from(id), result))
                .collect(),
        }
    }
}
