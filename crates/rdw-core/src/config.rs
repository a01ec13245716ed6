//! Client configuration parsed from an optional TOML file
//!
//! ```toml
//! base_url = "https://opendata.rdw.nl/resource"
//! timeout_secs = 10
//! user_agent = "rdw-mcp/0.1.0"
//! split_bodywork = false
//! ```
//!
//! Every key is optional; missing keys fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::DEFAULT_BASE_URL;
use crate::{Error, Result};

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("rdw-mcp/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Settings for talking to the RDW API and shaping the tool catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Resource root the dataset ids are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request deadline
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Also expose bodywork_specific and vehicle_class as individual tools
    #[serde(default)]
    pub split_bodywork: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            split_bodywork: false,
        }
    }
}

impl ClientConfig {
    /// Parse a configuration from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Reject values the HTTP client cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::Config {
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::Config {
                message: format!("base_url must be an http(s) URL, got '{}'", self.base_url),
            });
        }
        Ok(())
    }
}
