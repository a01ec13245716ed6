//! Single-endpoint fetching
//!
//! [`DatasetSource`] is the seam between lookups and the network: the
//! server holds an [`HttpSource`], tests substitute a canned source.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::dataset::{Dataset, Registry};
use crate::error::FetchError;
use crate::kenteken::Kenteken;
use crate::Result;

/// One row of an RDW dataset, passed through without schema binding
pub type Record = Map<String, Value>;

/// Something that can look up the rows of a dataset for a kenteken.
///
/// `Ok(vec![])` means the dataset genuinely has no rows; every failure to
/// obtain an answer is an `Err`.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self, dataset: Dataset, kenteken: &Kenteken)
    -> std::result::Result<Vec<Record>, FetchError>;
}

/// [`DatasetSource`] backed by the RDW open-data HTTP API
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    registry: Registry,
    timeout_secs: u64,
}

impl HttpSource {
    /// Build a source with a shared connection pool and per-call deadline
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            registry: Registry::new(&config.base_url),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                secs: self.timeout_secs,
            }
        } else if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            FetchError::Decode {
                message: err.to_string(),
            }
        } else {
            FetchError::Transport {
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch(
        &self,
        dataset: Dataset,
        kenteken: &Kenteken,
    ) -> std::result::Result<Vec<Record>, FetchError> {
        let endpoint = self.registry.endpoint(dataset);
        tracing::debug!(%dataset, url = %endpoint.url, %kenteken, "Fetching dataset");

        let response = self
            .client
            .get(&endpoint.url)
            .query(&endpoint.query(kenteken.as_str()))
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%dataset, status = status.as_u16(), "RDW returned non-success status");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let records = decode_records(&body)?;
        tracing::debug!(%dataset, rows = records.len(), "Fetched dataset");
        Ok(records)
    }
}

/// Decode a response body as a JSON array of records
pub fn decode_records(body: &[u8]) -> std::result::Result<Vec<Record>, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::Decode {
        message: e.to_string(),
    })
}
