//! MCP server implementation

use serde::Serialize;
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, error, info, warn};

use clarify_tui::InteractiveUi;

use crate::error::McpError;
use crate::protocol::*;
use crate::tools;

/// MCP Server
///
/// Handles Model Context Protocol requests via stdio transport. Tool calls
/// run to completion before the next request is read, so at most one
/// interview is on screen at a time.
pub struct McpServer<U: InteractiveUi> {
    ui: U,
    runtime: Runtime,
}

impl<U: InteractiveUi> McpServer<U> {
    /// Create a new MCP server that interviews through `ui`
    pub fn new(ui: U) -> Result<Self, McpError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { ui, runtime })
    }

    /// Run the MCP server (stdio transport)
    ///
    /// Reads JSON-RPC requests from stdin and writes responses to stdout.
    pub fn run(&mut self) -> Result<(), McpError> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        self.serve(stdin.lock(), &mut stdout)
    }

    /// Serve newline-delimited requests from `reader` until it closes
    pub fn serve<R: BufRead, W: Write>(
        &mut self,
        mut reader: R,
        writer: &mut W,
    ) -> Result<(), McpError> {
        info!("MCP server started");

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let response = match std::str::from_utf8(&buf) {
                Ok(line) => self.handle_request_line(line.trim_end_matches(['\n', '\r'])),
                Err(e) => {
                    error!("Request is not valid UTF-8: {}", e);
                    Some(envelope(JsonRpcError::new(
                        None,
                        -32700,
                        format!("Parse error: {}", e),
                    )))
                }
            };
            if let Some(response) = response {
                write_response(writer, &response)?;
            }
        }

        info!("MCP server stopped");
        Ok(())
    }

    /// Handle one request line, returning the response to send if any
    ///
    /// Blank lines and notifications produce no response.
    pub fn handle_request_line(&mut self, line: &str) -> Option<Value> {
        if line.trim().is_empty() {
            return None;
        }
        debug!("Received request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                return Some(envelope(JsonRpcError::new(
                    None,
                    -32700,
                    format!("Parse error: {}", e),
                )));
            }
        };

        if request.is_notification() {
            debug!(method = %request.method, "Ignoring notification");
            return None;
        }

        let id = request.id.clone();
        let response = match self.handle_request(request) {
            Ok(result) => envelope(JsonRpcResponse::new(id, result)),
            Err(e) => {
                warn!("Request failed: {}", e);
                envelope(JsonRpcError::new(id, e.error_code(), e.to_string()))
            }
        };
        Some(response)
    }

    fn handle_request(&mut self, request: JsonRpcRequest) -> Result<Value, McpError> {
        if request.jsonrpc != "2.0" {
            return Err(McpError::InvalidRequest(format!(
                "Unsupported jsonrpc version: {}",
                request.jsonrpc
            )));
        }

        match request.method.as_str() {
            "initialize" => self.handle_initialize(),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tool_call(request.params),
            "ping" => Ok(json!({})),
            other => Err(McpError::MethodNotFound(other.to_string())),
        }
    }

    fn handle_initialize(&self) -> Result<Value, McpError> {
        let response = InitializeResponse {
            protocol_version: PROTOCOL_VERSION.to_string(),
            server_info: ServerInfo {
                name: "clarify-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: Capabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
        };
        Ok(serde_json::to_value(response)?)
    }

    fn handle_tools_list(&self) -> Result<Value, McpError> {
        let response = ToolListResponse {
            tools: vec![tools::tool_definition()],
        };
        Ok(serde_json::to_value(response)?)
    }

    fn handle_tool_call(&mut self, params: Value) -> Result<Value, McpError> {
        let call: ToolCallParams = serde_json::from_value(params)
            .map_err(|e| McpError::InvalidParams(e.to_string()))?;

        if call.name != tools::QNA_TOOL {
            return Err(McpError::ToolNotFound(call.name));
        }

        let arguments = if call.arguments.is_null() {
            json!({})
        } else {
            call.arguments
        };
        let params: tools::QnaParams = serde_json::from_value(arguments)
            .map_err(|e| McpError::InvalidParams(e.to_string()))?;

        info!("{}", tools::render_call(&params));
        let result = self
            .runtime
            .block_on(tools::handle_qna(&mut self.ui, params))?;
        info!("{}", tools::render_result(&result));

        Ok(serde_json::to_value(result)?)
    }
}

fn envelope<T: Serialize>(message: T) -> Value {
    serde_json::to_value(message).unwrap_or_else(|e| {
        json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": {"code": -32603, "message": format!("Internal error: {}", e)}
        })
    })
}

/// Write one response frame
fn write_response<W: Write>(writer: &mut W, response: &Value) -> Result<(), McpError> {
    let response_str = serde_json::to_string(response)?;
    writeln!(writer, "{}", response_str)?;
    writer.flush()?;
    debug!("Sent response: {}", response_str);
    Ok(())
}
