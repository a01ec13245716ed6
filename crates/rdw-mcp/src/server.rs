//! MCP Server implementation
//!
//! The main server struct that reads JSON-RPC requests line by line, routes
//! them, and writes one response line per answered request.

use std::io::{BufRead, ErrorKind, Write};
use std::sync::Arc;

use rdw_core::{ClientConfig, DatasetSource, HttpSource};
use serde_json::{Value, json};

use crate::handlers::handle_tool_call;
use crate::protocol::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION, ServerCapabilities,
    ServerInfo, ToolCallParams, ToolsCapability, codes,
};
use crate::tools::{ToolCatalog, ToolResult};
use crate::{Error, Result};

/// Give up on the input stream after this many read errors in a row that
/// consumed no input. Undecodable lines are consumed and never count.
const MAX_CONSECUTIVE_READ_ERRORS: usize = 64;

/// MCP Server for RDW vehicle lookups
///
/// Requests are handled strictly one at a time: the next line is not read
/// until the previous response has been written, so responses come out in
/// request order.
///
/// # Example
///
/// ```ignore
/// use rdw_core::ClientConfig;
/// use rdw_mcp::RdwMcpServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let server = RdwMcpServer::new(&ClientConfig::default())?;
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct RdwMcpServer {
    source: Arc<dyn DatasetSource>,
    catalog: ToolCatalog,
}

impl RdwMcpServer {
    /// Create a server talking to the RDW API as configured
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let source = HttpSource::new(config)?;
        Ok(Self::with_source(
            Arc::new(source),
            ToolCatalog::new(config.split_bodywork),
        ))
    }

    /// Create a server on top of any dataset source
    pub fn with_source(source: Arc<dyn DatasetSource>, catalog: ToolCatalog) -> Self {
        Self { source, catalog }
    }

    /// Serve requests from stdin, answering on stdout, until stdin closes
    pub async fn run(&self) -> Result<()> {
        tracing::info!(tools = self.catalog.len(), "MCP server ready, listening on stdio");

        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.serve(stdin.lock(), stdout.lock()).await
    }

    /// Serve newline-delimited requests from `input`, writing responses to
    /// `output`.
    ///
    /// Unreadable lines and lines that are not a JSON-RPC request are
    /// skipped; the loop ends at end of input, when `output` fails, or when
    /// `input` keeps failing without yielding any bytes.
    pub async fn serve<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<()> {
        let mut consecutive_errors = 0;

        for line in input.lines() {
            let line = match line {
                Ok(line) => {
                    consecutive_errors = 0;
                    line
                }
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    tracing::warn!(error = %e, "Skipping undecodable input line");
                    continue;
                }
                Err(e) => {
                    consecutive_errors += 1;
                    tracing::warn!(error = %e, "Skipping unreadable input");
                    if consecutive_errors >= MAX_CONSECUTIVE_READ_ERRORS {
                        tracing::error!("Too many consecutive read errors, stopping");
                        return Err(Error::Io(e));
                    }
                    continue;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            match self.handle_message(line).await {
                Ok(response) if !response.is_empty() => {
                    writeln!(output, "{}", response)?;
                    output.flush()?;
                }
                Ok(_) => {} // No response needed (notifications)
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping malformed message");
                }
            }
        }

        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Returns the JSON-RPC response as a string, or an empty string when no
    /// response is due (notifications). Fails only when `message` is not a
    /// JSON-RPC request at all.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let request: JsonRpcRequest = serde_json::from_str(message)?;

        // Notifications never get a reply, whatever the method
        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return Ok(String::new());
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id)?,
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "list_tools" | "tools/list" => self.handle_tools_list(request.id),
            "call_tool" | "tools/call" => {
                self.handle_tools_call(request.id, request.params).await?
            }
            _ => {
                tracing::warn!(method = %request.method, "Method not found");
                JsonRpcResponse::error(
                    request.id,
                    codes::METHOD_NOT_FOUND,
                    format!("Method not found: {}", request.method),
                )
            }
        };

        serde_json::to_string(&response).map_err(Error::from)
    }

    /// Handle the initialize request
    fn handle_initialize(&self, id: Option<Value>) -> Result<JsonRpcResponse> {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability::default(),
            },
            server_info: ServerInfo {
                name: "rdw-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    /// Handle list_tools request
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools_value: Vec<Value> = self
            .catalog
            .definitions()
            .into_iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools_value }))
    }

    /// Handle call_tool request
    ///
    /// Tool failures are reported inside a successful response with
    /// `isError: true`; only unusable params yield a JSON-RPC error.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let tool_params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    id,
                    codes::INVALID_PARAMS,
                    format!("Invalid params: {}", e),
                ));
            }
        };

        let tool_result = match handle_tool_call(
            self.source.as_ref(),
            &self.catalog,
            &tool_params.name,
            tool_params.arguments,
        )
        .await
        {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(tool = %tool_params.name, error = %e, "Tool call failed");
                ToolResult::error(e.to_string())
            }
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(tool_result)?))
    }

    /// Get the exposed tools
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }
}
