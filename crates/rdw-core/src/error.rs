//! Error types for rdw-core

use std::path::PathBuf;

/// Result type for rdw-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single dataset fetch.
///
/// Kept separate from [`Error`] so that callers can tell "the dataset has no
/// rows for this kenteken" (`Ok(vec![])`) apart from "the lookup failed".
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection could not be established or broke mid-request
    #[error("verbinding met RDW mislukt: {message}")]
    Transport { message: String },

    /// The per-call deadline elapsed
    #[error("RDW reageerde niet binnen {secs} seconden")]
    Timeout { secs: u64 },

    /// RDW answered with a non-success status
    #[error("RDW API gaf status {status}")]
    Status { status: u16 },

    /// The body was not a JSON array of records
    #[error("onleesbaar antwoord van RDW: {message}")]
    Decode { message: String },
}

/// Errors that can occur in rdw-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dataset fetch failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Invalid client configuration
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// HTTP client could not be constructed
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlParse(#[from] toml::de::Error),
}
