use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::extract::{ExtractionResult, Extractor};
use crate::mcp::protocol::{self, Request, RequestId, Response, RpcError};
use crate::mcp::{contracts, tool_definitions};
use crate::tools::{self, ToolResult};

/// Method router shared by the stdio and HTTP transports. Both feed raw
/// request text through [`Dispatcher::handle_text`], so the two surfaces
/// cannot drift apart.
pub struct Dispatcher {
    extractor: Extractor,
}

impl Dispatcher {
    pub fn new(extractor: Extractor) -> Self {
        Dispatcher { extractor }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Parse one request out of raw text and route it. Malformed input gets
    /// a JSON-RPC error response with a null id.
    pub fn handle_text(&self, text: &str) -> Option<Response> {
        match protocol::parse_request(text) {
            Ok(request) => self.handle_request(request),
            Err(e) => Some(Response::from_error(RequestId::Null, e)),
        }
    }

    /// Notifications produce no response.
    pub fn handle_request(&self, request: Request) -> Option<Response> {
        debug!(method = %request.method, "handling request");
        match request.method.as_str() {
            "initialize" => Some(Response::success(request.id, initialize_result())),
            "notifications/initialized" => None,
            "tools/list" => Some(Response::success(
                request.id,
                json!({"tools": tool_definitions()}),
            )),
            "tools/call" => Some(self.call_tool(request)),
            "ping" => Some(Response::success(request.id, json!({}))),
            _ => {
                let method = request.method.clone();
                Some(Response::from_error(
                    request.id,
                    RpcError::MethodNotFound(method),
                ))
            }
        }
    }

    fn call_tool(&self, request: Request) -> Response {
        let params = request.params.unwrap_or(Value::Null);
        let name = params.get("name").and_then(Value::as_str).unwrap_or_default();
        let args = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        let result = match name {
            contracts::TOOL_EXTRACT_FILE => tools::extract_file::call(&self.extractor, &args),
            other => {
                warn!(tool = other, "unknown tool requested");
                ToolResult::from_extraction(&ExtractionResult::protocol_error(format!(
                    "unknown tool: {other}"
                )))
            }
        };

        match serde_json::to_value(&result) {
            Ok(value) => Response::success(request.id, value),
            Err(e) => {
                warn!(error = %e, "tool result failed to serialize");
                Response::from_error(request.id, RpcError::InternalError(e.to_string()))
            }
        }
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": contracts::PROTOCOL_VERSION,
        "capabilities": {
            "tools": {},
            "logging": {},
        },
        "serverInfo": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}
