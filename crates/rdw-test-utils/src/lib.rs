//! Shared test utilities for the rdw-mcp workspace.
//!
//! This crate provides an in-memory [`DatasetSource`] so lookups can be
//! tested without touching the RDW API. It is a dev-dependency only, never
//! published.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rdw_core::{Dataset, DatasetSource, FetchError, Kenteken, Record, decode_records};
use serde_json::Value;
use tokio::sync::Barrier;

/// What a canned dataset answers with
#[derive(Debug, Clone)]
pub enum Canned {
    /// A successful response with these rows
    Rows(Vec<Record>),
    /// A raw response body, decoded the way the HTTP source decodes it
    Body(String),
    /// A non-success HTTP status
    Status(u16),
    /// Connection refused
    Unreachable,
}

/// In-memory [`DatasetSource`] answering from canned responses.
///
/// Datasets without a canned response answer with zero rows. Every call is
/// recorded so tests can assert which datasets were queried and with which
/// kenteken.
///
/// # Example
///
/// ```rust,no_run
/// use rdw_core::Dataset;
/// use rdw_test_utils::CannedSource;
/// use serde_json::json;
///
/// let source = CannedSource::new().with_rows(Dataset::Info, json!([{"merk": "TOYOTA"}]));
/// ```
#[derive(Debug, Default)]
pub struct CannedSource {
    responses: HashMap<Dataset, Canned>,
    calls: Mutex<Vec<(Dataset, String)>>,
    barrier: Option<Barrier>,
}

impl CannedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `dataset` with the rows of a JSON array of objects.
    ///
    /// Panics if `rows` is not an array of objects.
    pub fn with_rows(mut self, dataset: Dataset, rows: Value) -> Self {
        let rows = match rows {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => map,
                    other => panic!("canned row is not an object: {other}"),
                })
                .collect(),
            other => panic!("canned rows are not an array: {other}"),
        };
        self.responses.insert(dataset, Canned::Rows(rows));
        self
    }

    /// Answer `dataset` with an arbitrary canned response
    pub fn with(mut self, dataset: Dataset, canned: Canned) -> Self {
        self.responses.insert(dataset, canned);
        self
    }

    /// Make every fetch wait until `parties` fetches are in flight at once.
    ///
    /// A sequential caller never gets past the first fetch, so this proves
    /// that lookups actually overlap. Combine with a timeout in the test.
    pub fn require_concurrency(mut self, parties: usize) -> Self {
        self.barrier = Some(Barrier::new(parties));
        self
    }

    /// Datasets queried so far, in call order, with the kenteken used
    pub fn calls(&self) -> Vec<(Dataset, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made for `dataset`
    pub fn call_count(&self, dataset: Dataset) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(d, _)| *d == dataset)
            .count()
    }
}

#[async_trait]
impl DatasetSource for CannedSource {
    async fn fetch(&self, dataset: Dataset, kenteken: &Kenteken) -> Result<Vec<Record>, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((dataset, kenteken.as_str().to_string()));

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        match self.responses.get(&dataset) {
            None => Ok(Vec::new()),
            Some(Canned::Rows(rows)) => Ok(rows.clone()),
            Some(Canned::Body(body)) => decode_records(body.as_bytes()),
            Some(Canned::Status(status)) => Err(FetchError::Status { status: *status }),
            Some(Canned::Unreachable) => Err(FetchError::Transport {
                message: "connection refused".to_string(),
            }),
        }
    }
}
