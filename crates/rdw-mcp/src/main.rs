//! RDW MCP Server
//!
//! A Model Context Protocol server that answers vehicle questions from the
//! Dutch RDW open-data registry.
//!
//! # Usage
//!
//! ```bash
//! rdw-mcp [--config <path>] [--base-url <url>] [--timeout-secs <n>] [--split-bodywork]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `rdw_mcp=info,rdw_core=info`)
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdin/stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::path::PathBuf;

use clap::Parser;
use rdw_core::ClientConfig;
use rdw_mcp::RdwMcpServer;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "rdw_mcp=info,rdw_core=info";

/// MCP server for RDW vehicle lookups
#[derive(Parser)]
#[command(name = "rdw-mcp")]
#[command(about = "MCP server for RDW open-data vehicle lookups")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RDW resource root, overrides the configuration file
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds, overrides the configuration file
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Also expose bodywork_specific and vehicle_class as separate tools
    #[arg(long)]
    split_bodywork: bool,
}

impl Args {
    fn client_config(&self) -> rdw_core::Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::default(),
        };
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if self.split_bodywork {
            config.split_bodywork = true;
        }
        config.validate()?;
        Ok(config)
    }
}

/// `RUST_LOG` when set and valid, otherwise info for the server crates
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.client_config()?;

    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        split_bodywork = config.split_bodywork,
        "Starting rdw-mcp server"
    );

    let server = RdwMcpServer::new(&config)?;
    server.run().await?;

    Ok(())
}
