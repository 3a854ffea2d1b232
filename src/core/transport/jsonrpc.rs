//! JSON-RPC 2.0 message types and request routing.
//!
//! One inbound frame decodes to a [`JsonRpcRequest`]; [`process_request`]
//! routes it to the server and produces the matching [`JsonRpcResponse`],
//! echoing the request id. Notifications produce no response frame.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::McpServer;

/// Protocol version reported during initialize.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Parse error (undecodable frame).
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::error(None, -32700, msg)
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }
}

/// Process one decoded request and return the response to write back,
/// or `None` for notifications.
pub async fn process_request(server: &McpServer, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::invalid_request(request.id));
    }

    match request.method.as_str() {
        // Initialize the MCP session
        "initialize" => {
            info!("Processing initialize request");
            Some(JsonRpcResponse::success(
                request.id,
                server.initialize_result(),
            ))
        }

        // Liveness probe
        "ping" => Some(JsonRpcResponse::success(request.id, serde_json::json!({}))),

        // List available tools
        "tools/list" => {
            info!("Processing tools/list request");
            let result = serde_json::json!({
                "tools": server.list_tools()
            });
            Some(JsonRpcResponse::success(request.id, result))
        }

        // Call a tool
        "tools/call" => Some(handle_tools_call(server, request).await),

        // Notifications carry no id and get no response frame
        method if method.starts_with("notifications/") => {
            info!("Received notification: {}", method);
            None
        }

        // Unknown method
        _ => {
            warn!("Unknown method: {}", request.method);
            Some(JsonRpcResponse::method_not_found(request.id))
        }
    }
}

/// Handle tools/call request.
async fn handle_tools_call(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id, "Missing params"),
    };

    let name = match params.get("name").and_then(|v| v.as_str()) {
        Some(n) => n.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id, "Missing tool name"),
    };

    let arguments = params.get("arguments").cloned();

    let outcome = server.call_tool(&name, arguments).await;
    JsonRpcResponse::success(request.id, outcome.to_wire())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use serde_json::json;

    fn server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    fn request(method: &str, params: Option<serde_json::Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_initialize_reports_server_info() {
        let response = process_request(&server(), request("initialize", Some(json!({}))))
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "weather-mcp-server");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_tools_list_names_both_tools() {
        let response = process_request(&server(), request("tools/list", None))
            .await
            .unwrap();
        let tools = response.result.unwrap()["tools"].clone();
        let names: Vec<_> = tools
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert!(names.contains(&"getServerName".to_string()));
        assert!(names.contains(&"getWeatherByCity".to_string()));
    }

    #[tokio::test]
    async fn test_tools_call_echoes_id() {
        let mut req = request(
            "tools/call",
            Some(json!({ "name": "getServerName", "arguments": {} })),
        );
        req.id = Some(json!("call-7"));
        let response = process_request(&server(), req).await.unwrap();
        assert_eq!(response.id, Some(json!("call-7")));
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_tools_call_without_name_is_invalid_params() {
        let response = process_request(&server(), request("tools/call", Some(json!({}))))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_unknown_method_is_method_not_found() {
        let response = process_request(&server(), request("resources/list", None))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_wrong_version_is_invalid_request() {
        let mut req = request("tools/list", None);
        req.jsonrpc = "1.0".to_string();
        let response = process_request(&server(), req).await.unwrap();
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_notification_produces_no_response() {
        let mut req = request("notifications/initialized", None);
        req.id = None;
        assert!(process_request(&server(), req).await.is_none());
    }
}
