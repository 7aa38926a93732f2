//! JSON-RPC 2.0 message types for the MCP stdio transport.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC version string.
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol version advertised during initialization.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// An incoming JSON-RPC message. Requests carry an id; notifications omit
/// it and expect no response.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0").
    pub jsonrpc: String,
    /// Request id. `None` marks a notification. Clients may use numbers or
    /// strings, so the id is kept as a raw value.
    #[serde(default)]
    pub id: Option<Value>,
    /// Method name to dispatch.
    pub method: String,
    /// Method parameters.
    #[serde(default)]
    pub params: Option<Value>,
}

/// An outgoing JSON-RPC response.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0").
    pub jsonrpc: String,
    /// Id of the request this answers.
    pub id: Value,
    /// Result on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Build a success response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Build an error response.
    pub fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Error message.
    pub message: String,
}

// Standard JSON-RPC error codes
impl JsonRpcError {
    /// Parse error - invalid JSON.
    pub const PARSE_ERROR: i64 = -32700;
    /// Method not found.
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// Invalid params.
    pub const INVALID_PARAMS: i64 = -32602;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notification_has_no_id() {
        let req: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc": "2.0", "method": "notifications/initialized"}"#)
                .unwrap();
        assert!(req.id.is_none());
    }

    #[test]
    fn string_ids_are_preserved() {
        let req: JsonRpcRequest = serde_json::from_str(
            r#"{"jsonrpc": "2.0", "id": "abc", "method": "ping"}"#,
        )
        .unwrap();
        assert_eq!(req.id, Some(json!("abc")));
    }

    #[test]
    fn error_response_omits_result() {
        let resp = JsonRpcResponse::error(json!(1), JsonRpcError::METHOD_NOT_FOUND, "nope");
        let text = serde_json::to_string(&resp).unwrap();
        assert!(!text.contains("\"result\""));
        assert!(text.contains("-32601"));
    }
}
