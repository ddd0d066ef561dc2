//! MCP server loop over the stdio transport.
//!
//! Reads JSON-RPC messages line by line, routes `initialize`, `ping`,
//! `tools/list` and `tools/call`, and writes responses back. Notifications
//! (no `id`) never receive a response.

use crate::dispatcher::ToolDispatcher;
use crate::error::TransportError;
use crate::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolsCapability,
    DEFAULT_PROTOCOL_VERSION, JSONRPC_VERSION,
};
use crate::transport::{InboundLine, StdioTransport};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, error, info, warn};

pub struct McpServer {
    dispatcher: ToolDispatcher,
    server_info: ServerInfo,
}

impl McpServer {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self {
            dispatcher,
            server_info: ServerInfo::default(),
        }
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn start(&self) -> Result<(), TransportError> {
        self.serve(StdioTransport::stdio()).await.map(|_| ())
    }

    /// Run the server loop until the transport reaches EOF. Returns the transport
    /// so callers can inspect what was written.
    pub async fn serve<R, W>(
        &self,
        mut transport: StdioTransport<R, W>,
    ) -> Result<StdioTransport<R, W>, TransportError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("MCP server listening on stdio");

        loop {
            let line = match transport.read_line().await? {
                Some(InboundLine::Message(line)) if line.is_empty() => continue,
                Some(InboundLine::Message(line)) => line,
                Some(InboundLine::Malformed(reason)) => {
                    warn!(reason = %reason, "unreadable line on stdin");
                    let response =
                        JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error(reason));
                    Self::respond(&mut transport, &response).await?;
                    continue;
                }
                None => {
                    info!("stdin closed, shutting down");
                    return Ok(transport);
                }
            };

            if let Some(response) = self.handle_message(&line).await {
                Self::respond(&mut transport, &response).await?;
            }
        }
    }

    async fn respond<R, W>(
        transport: &mut StdioTransport<R, W>,
        response: &JsonRpcResponse,
    ) -> Result<(), TransportError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        match serde_json::to_string(response) {
            Ok(json) => transport.write_line(&json).await,
            Err(e) => {
                error!(error = %e, "failed to serialize response");
                Err(TransportError::Write(e.to_string()))
            }
        }
    }

    /// Handle one raw inbound line. `None` means nothing should be written.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "failed to parse JSON-RPC message");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(e.to_string()),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!("Invalid Request: {}", e)),
            )),
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            debug!(method = %request.method, "received notification");
            return None;
        };
        debug!(method = %request.method, id = %id, "received request");

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported jsonrpc version: {}",
                    request.jsonrpc
                )),
            ));
        }

        let params = request.params.unwrap_or(Value::Null);
        let response = match request.method.as_str() {
            "initialize" => self.initialize(id, params),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::from_result(
                id,
                &ListToolsResult {
                    tools: self.dispatcher.list_tools().to_vec(),
                },
            ),
            "tools/call" => self.call_tool(id, params).await,
            other => JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)),
        };
        Some(response)
    }

    fn initialize(&self, id: Value, params: Value) -> JsonRpcResponse {
        let params: InitializeParams = if params.is_null() {
            InitializeParams::default()
        } else {
            match serde_json::from_value(params) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(id, JsonRpcError::invalid_params(e.to_string()))
                }
            }
        };

        if let Some(client) = &params.client_info {
            info!(client = %client.name, version = %client.version, "client connected");
        }

        JsonRpcResponse::from_result(
            id,
            &InitializeResult {
                protocol_version: params
                    .protocol_version
                    .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string()),
                capabilities: ServerCapabilities {
                    tools: ToolsCapability {
                        list_changed: false,
                    },
                },
                server_info: self.server_info.clone(),
            },
        )
    }

    async fn call_tool(&self, id: Value, params: Value) -> JsonRpcResponse {
        let params: CallToolParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)),
                )
            }
        };

        let result = self.dispatcher.call_tool(&params.name, params.arguments).await;
        JsonRpcResponse::from_result(id, &result)
    }
}
