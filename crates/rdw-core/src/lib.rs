//! Core lookup logic for the RDW MCP server
//!
//! Everything needed to answer "what does RDW know about this kenteken",
//! independent of the protocol that asks the question:
//!
//! - [`kenteken`] - plate normalization
//! - [`dataset`] - the fixed dataset → endpoint registry
//! - [`fetch`] - single-dataset lookups behind the [`DatasetSource`] trait
//! - [`bodywork`] - concurrent fan-out over the three bodywork datasets
//! - [`config`] - client settings loaded from TOML

pub mod bodywork;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod kenteken;

pub use bodywork::{BODYWORK_DATASETS, CombinedResult, FieldOutcome, fetch_bodywork};
pub use config::ClientConfig;
pub use dataset::{DEFAULT_BASE_URL, Dataset, Endpoint, Registry};
pub use error::{Error, FetchError, Result};
pub use fetch::{DatasetSource, HttpSource, Record, decode_records};
pub use kenteken::Kenteken;
