#![allow(dead_code)]

//! JSON-RPC 2.0 framing shared by the stdio and HTTP transports.
//!
//! Self-contained: the protocol surface is small enough that no external
//! JSON-RPC library is warranted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(default)]
    pub id: RequestId,
}

/// Request ids may be numbers, strings, or absent (notifications).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
    #[default]
    Null,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
    pub id: RequestId,
}

impl Response {
    pub fn success(id: RequestId, result: Value) -> Self {
        Response {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn from_error(id: RequestId, err: RpcError) -> Self {
        Response {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(err.into()),
            id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
}

impl From<RpcError> for ErrorObject {
    fn from(err: RpcError) -> Self {
        ErrorObject {
            code: err.code(),
            message: err.message(),
        }
    }
}

/// Standard JSON-RPC 2.0 error conditions this server can report.
#[derive(Debug, Clone)]
pub enum RpcError {
    ParseError(String),
    InvalidRequest(String),
    MethodNotFound(String),
    InvalidParams(String),
    InternalError(String),
}

impl RpcError {
    pub fn code(&self) -> i32 {
        match self {
            RpcError::ParseError(_) => -32700,
            RpcError::InvalidRequest(_) => -32600,
            RpcError::MethodNotFound(_) => -32601,
            RpcError::InvalidParams(_) => -32602,
            RpcError::InternalError(_) => -32603,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RpcError::ParseError(msg) => format!("Parse error: {msg}"),
            RpcError::InvalidRequest(msg) => format!("Invalid request: {msg}"),
            RpcError::MethodNotFound(method) => format!("Method not found: {method}"),
            RpcError::InvalidParams(msg) => format!("Invalid params: {msg}"),
            RpcError::InternalError(msg) => format!("Internal error: {msg}"),
        }
    }
}

pub fn parse_request(text: &str) -> Result<Request, RpcError> {
    let request: Request =
        serde_json::from_str(text).map_err(|e| RpcError::ParseError(e.to_string()))?;

    if request.jsonrpc != JSONRPC_VERSION {
        return Err(RpcError::InvalidRequest(format!(
            "expected jsonrpc version {JSONRPC_VERSION:?}, got {:?}",
            request.jsonrpc
        )));
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_request_with_numeric_id() {
        let req = parse_request(r#"{"jsonrpc":"2.0","method":"tools/list","id":1}"#).unwrap();
        assert_eq!(req.method, "tools/list");
        assert_eq!(req.id, RequestId::Number(1));
        assert!(req.params.is_none());
    }

    #[test]
    fn parse_request_with_string_id_and_params() {
        let req = parse_request(
            r#"{"jsonrpc":"2.0","method":"tools/call","params":{"name":"x"},"id":"abc"}"#,
        )
        .unwrap();
        assert_eq!(req.id, RequestId::String("abc".to_string()));
        assert!(req.params.is_some());
    }

    #[test]
    fn parse_request_rejects_wrong_version() {
        let err = parse_request(r#"{"jsonrpc":"1.0","method":"ping","id":1}"#).unwrap_err();
        assert_eq!(err.code(), -32600);
    }

    #[test]
    fn parse_request_rejects_garbage() {
        let err = parse_request("not json at all").unwrap_err();
        assert_eq!(err.code(), -32700);
    }

    #[test]
    fn success_response_omits_error() {
        let resp = Response::success(RequestId::Number(1), serde_json::json!({"ok": true}));
        let text = serde_json::to_string(&resp).unwrap();
        assert!(text.contains("\"result\""));
        assert!(!text.contains("\"error\""));
    }

    #[test]
    fn error_response_carries_code() {
        let resp = Response::from_error(
            RequestId::Number(1),
            RpcError::MethodNotFound("bogus".to_string()),
        );
        let text = serde_json::to_string(&resp).unwrap();
        assert!(text.contains("\"error\""));
        assert!(text.contains("-32601"));
    }
}
