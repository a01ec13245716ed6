//! MCP Server for RDW vehicle lookups
//!
//! This crate exposes the Dutch RDW open-data vehicle registry via the Model
//! Context Protocol, so agents can look up a vehicle by its kenteken.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client ]
//!        | (JSON-RPC over stdio, one message per line)
//!        v
//! [ rdw-mcp: server -> handlers ]
//!        | (DatasetSource)
//!        v
//! [ rdw-core: fetch / bodywork fan-out ]
//!        |
//!        +--> [ opendata.rdw.nl ]
//! ```
//!
//! # Methods
//!
//! - `initialize` - capabilities and server info
//! - `list_tools` / `tools/list` - the tool catalog
//! - `call_tool` / `tools/call` - run a lookup
//! - `ping`

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use server::RdwMcpServer;
pub use tools::{ToolCatalog, ToolContent, ToolDefinition, ToolResult};
