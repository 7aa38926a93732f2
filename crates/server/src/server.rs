//! MCP server: method dispatch and the framed stdio loop.

use crate::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION, MCP_PROTOCOL_VERSION,
};
use crate::tools;
use deck_core::presentation_prompt;
use serde_json::{json, Value};
use std::io::{BufRead, Write};

/// Name of the single exposed tool.
pub const TOOL_GENERATE: &str = "generate_presentation";
/// Name of the single exposed prompt.
pub const PROMPT_PRESENTATION: &str = "presentation_prompt";

/// Stateless MCP server exposing deck generation.
pub struct McpServer;

impl McpServer {
    /// Create a new server.
    pub fn new() -> Self {
        Self
    }

    /// Serve framed JSON-RPC messages until EOF.
    ///
    /// Messages are framed with a `Content-Length` header. Responses go to
    /// `writer`; diagnostics go to the logger, never to the protocol
    /// stream.
    pub fn run<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> std::io::Result<()> {
        loop {
            let mut content_length: Option<usize> = None;
            let mut header_line = String::new();

            // Read headers until the blank separator line.
            loop {
                header_line.clear();
                if reader.read_line(&mut header_line)? == 0 {
                    return Ok(()); // EOF
                }
                let trimmed = header_line.trim();
                if trimmed.is_empty() {
                    break;
                }
                if let Some(value) = trimmed.strip_prefix("Content-Length:") {
                    content_length = value.trim().parse().ok();
                }
            }

            let Some(content_length) = content_length else {
                log::warn!("Message without Content-Length header, skipping");
                continue;
            };

            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body)?;
            let body = String::from_utf8_lossy(&body);

            if let Some(response) = self.handle_message(&body) {
                let payload = serde_json::to_string(&response)
                    .unwrap_or_else(|e| fallback_internal_error(&e.to_string()));
                write!(
                    writer,
                    "Content-Length: {}\r\n\r\n{}",
                    payload.len(),
                    payload
                )?;
                writer.flush()?;
            }
        }
    }

    /// Handle one raw message body. Returns `None` for notifications.
    pub fn handle_message(&self, body: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(body) {
            Ok(req) => req,
            Err(e) => {
                log::warn!("Unparseable message: {e}");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::PARSE_ERROR,
                    "Parse error",
                ));
            }
        };

        match request.id.clone() {
            Some(id) => Some(self.handle_request(id, &request)),
            None => {
                log::debug!("Ignoring notification: {}", request.method);
                None
            }
        }
    }

    /// Dispatch a single request.
    pub fn handle_request(&self, id: Value, request: &JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(
                id,
                json!({
                    "protocolVersion": MCP_PROTOCOL_VERSION,
                    "capabilities": {
                        "tools": {},
                        "prompts": {}
                    },
                    "serverInfo": {
                        "name": "deckgen",
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }),
            ),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": [tool_info()] })),
            "tools/call" => self.handle_tool_call(id, request.params.as_ref()),
            "prompts/list" => {
                JsonRpcResponse::success(id, json!({ "prompts": [prompt_info()] }))
            }
            "prompts/get" => self.handle_prompt_get(id, request.params.as_ref()),
            method => JsonRpcResponse::error(
                id,
                JsonRpcError::METHOD_NOT_FOUND,
                format!("Method not found: {method}"),
            ),
        }
    }

    fn handle_tool_call(&self, id: Value, params: Option<&Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(id, JsonRpcError::INVALID_PARAMS, "Missing params");
        };
        let name = params.get("name").and_then(Value::as_str).unwrap_or("");
        let args = params.get("arguments").cloned().unwrap_or(json!({}));

        if name != TOOL_GENERATE {
            return JsonRpcResponse::success(
                id,
                tool_text_result(&format!("Unknown tool: {name}"), true),
            );
        }

        let Some(json_input) = args.get("json_input").and_then(Value::as_str) else {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::INVALID_PARAMS,
                "Missing required argument: json_input",
            );
        };
        let output_dir = args
            .get("output_dir")
            .and_then(Value::as_str)
            .unwrap_or("presentation");

        match tools::run_generate(json_input, output_dir) {
            Ok(path) => JsonRpcResponse::success(
                id,
                tool_text_result(
                    &format!("Presentation successfully saved as: {}", path.display()),
                    false,
                ),
            ),
            Err(e) => JsonRpcResponse::success(id, tool_text_result(&e.to_string(), true)),
        }
    }

    fn handle_prompt_get(&self, id: Value, params: Option<&Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(id, JsonRpcError::INVALID_PARAMS, "Missing params");
        };
        let name = params.get("name").and_then(Value::as_str).unwrap_or("");
        if name != PROMPT_PRESENTATION {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::INVALID_PARAMS,
                format!("Unknown prompt: {name}"),
            );
        }

        let args = params.get("arguments").cloned().unwrap_or(json!({}));
        let Some(topic) = args.get("topic").and_then(Value::as_str) else {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::INVALID_PARAMS,
                "Missing required argument: topic",
            );
        };
        let tone = args.get("tone").and_then(Value::as_str).unwrap_or("student");

        JsonRpcResponse::success(
            id,
            json!({
                "description": "Prompt for generating presentation deck JSON",
                "messages": [{
                    "role": "user",
                    "content": {
                        "type": "text",
                        "text": presentation_prompt(topic, tone)
                    }
                }]
            }),
        )
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tool descriptor returned by `tools/list`.
fn tool_info() -> Value {
    json!({
        "name": TOOL_GENERATE,
        "description": "Generate a PowerPoint presentation from a JSON string or JSON file. \
                        Saves the presentation as a .pptx in the specified output directory.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "json_input": {
                    "type": "string",
                    "description": "Inline JSON deck description, or a path to a JSON file"
                },
                "output_dir": {
                    "type": "string",
                    "description": "Output directory for the .pptx (default: \"presentation\")"
                }
            },
            "required": ["json_input"]
        }
    })
}

/// Prompt descriptor returned by `prompts/list`.
fn prompt_info() -> Value {
    json!({
        "name": PROMPT_PRESENTATION,
        "description": "Prompt for creating a presentation on a topic, in a given tone. \
                        Instructs the model to output deck JSON only.",
        "arguments": [
            { "name": "topic", "description": "Presentation topic", "required": true },
            { "name": "tone", "description": "Audience tone: business, student, teacher, or child", "required": false }
        ]
    })
}

/// A `tools/call` result carrying a single text content block.
fn tool_text_result(text: &str, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error
    })
}

/// Last-resort response body when serialization itself fails.
fn fallback_internal_error(detail: &str) -> String {
    format!(
        "{{\"jsonrpc\":\"{JSONRPC_VERSION}\",\"id\":null,\"error\":{{\"code\":-32603,\"message\":\"{detail}\"}}}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn request(method: &str, params: Value) -> String {
        serde_json::to_string(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params
        }))
        .unwrap()
    }

    fn result_of(response: &JsonRpcResponse) -> &Value {
        response.result.as_ref().expect("expected success result")
    }

    #[test]
    fn initialize_reports_capabilities_and_server_info() {
        let server = McpServer::new();
        let resp = server
            .handle_message(&request("initialize", json!({})))
            .unwrap();
        let result = result_of(&resp);
        assert_eq!(result["protocolVersion"], MCP_PROTOCOL_VERSION);
        assert!(result["capabilities"].get("tools").is_some());
        assert!(result["capabilities"].get("prompts").is_some());
        assert_eq!(result["serverInfo"]["name"], "deckgen");
    }

    #[test]
    fn tools_list_exposes_the_generator() {
        let server = McpServer::new();
        let resp = server
            .handle_message(&request("tools/list", json!({})))
            .unwrap();
        let tools = result_of(&resp)["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], TOOL_GENERATE);
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["json_input"]));
    }

    #[test]
    fn tool_call_with_invalid_deck_is_a_tool_level_error() {
        let server = McpServer::new();
        let resp = server
            .handle_message(&request(
                "tools/call",
                json!({
                    "name": TOOL_GENERATE,
                    "arguments": { "json_input": "{\"slides\": []}" }
                }),
            ))
            .unwrap();
        let result = result_of(&resp);
        assert_eq!(result["isError"], true);
        assert_eq!(
            result["content"][0]["text"],
            "Invalid JSON format. Must include 'topic' and 'slides'."
        );
    }

    #[test]
    fn tool_call_without_json_input_is_invalid_params() {
        let server = McpServer::new();
        let resp = server
            .handle_message(&request(
                "tools/call",
                json!({ "name": TOOL_GENERATE, "arguments": {} }),
            ))
            .unwrap();
        assert_eq!(resp.error.unwrap().code, JsonRpcError::INVALID_PARAMS);
    }

    #[test]
    fn unknown_tool_is_reported_in_content() {
        let server = McpServer::new();
        let resp = server
            .handle_message(&request(
                "tools/call",
                json!({ "name": "explode", "arguments": {} }),
            ))
            .unwrap();
        let result = result_of(&resp);
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["text"], "Unknown tool: explode");
    }

    #[test]
    fn prompts_get_builds_the_template() {
        let server = McpServer::new();
        let resp = server
            .handle_message(&request(
                "prompts/get",
                json!({
                    "name": PROMPT_PRESENTATION,
                    "arguments": { "topic": "Rust", "tone": "teacher" }
                }),
            ))
            .unwrap();
        let text = result_of(&resp)["messages"][0]["content"]["text"]
            .as_str()
            .unwrap();
        assert!(text.contains("Topic: \"Rust\""));
        assert!(text.contains("for teachers"));
    }

    #[test]
    fn unknown_method_is_a_protocol_error() {
        let server = McpServer::new();
        let resp = server
            .handle_message(&request("resources/list", json!({})))
            .unwrap();
        assert_eq!(resp.error.unwrap().code, JsonRpcError::METHOD_NOT_FOUND);
    }

    #[test]
    fn notifications_produce_no_response() {
        let server = McpServer::new();
        let resp = server.handle_message(
            r#"{"jsonrpc": "2.0", "method": "notifications/initialized"}"#,
        );
        assert!(resp.is_none());
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let server = McpServer::new();
        let resp = server.handle_message("{oops").unwrap();
        assert_eq!(resp.error.unwrap().code, JsonRpcError::PARSE_ERROR);
    }

    #[test]
    fn run_loop_answers_framed_requests() {
        let body = request("ping", json!({}));
        let input = format!("Content-Length: {}\r\n\r\n{}", body.len(), body);
        let mut output = Vec::new();

        McpServer::new()
            .run(Cursor::new(input.into_bytes()), &mut output)
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Content-Length: "));
        assert!(text.contains("\"jsonrpc\":\"2.0\""));
        assert!(text.contains("\"result\":{}"));
    }
}
