//! Error types for the MCP server

use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during MCP server operations
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the core lookup logic
    #[error("core error: {0}")]
    Core(#[from] rdw_core::Error),

    /// A dataset lookup failed
    #[error("Fout bij het ophalen van RDW-gegevens: {0}")]
    Fetch(#[from] rdw_core::FetchError),

    /// Every lookup of a composite tool failed
    #[error("Fout bij het ophalen van RDW-gegevens: {}", .0.join("; "))]
    AllFetchesFailed(Vec<String>),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument provided
    #[error("{0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
