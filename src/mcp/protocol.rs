//! MCP (Model Context Protocol) message structures and JSON-RPC handling
//!
//! This module defines the JSON-RPC message format that MCP clients use to
//! talk to the habit server, and maps tool errors onto JSON-RPC codes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::storage::StorageError;
use crate::tools::{ToolError, ToolInfo};

/// MCP protocol version we support
pub const MCP_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 request message
///
/// Requests without an `id` are notifications and get no response.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    #[allow(dead_code)]
    pub jsonrpc: String,
    /// Unique identifier for this request; `Some(Value::Null)` for `"id": null`
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    /// The method to call (e.g., "tools/call")
    pub method: String,
    /// Parameters for the method call
    pub params: Option<Value>,
}

/// Any `id` member that is present, null included, marks a request
fn present_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// JSON-RPC 2.0 response message
///
/// Contains either a successful result or an error.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Request ID that we're responding to
    pub id: Value,
    /// Successful result (if no error occurred)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error information (if something went wrong)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error information
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// Error code (standard JSON-RPC codes)
    pub code: i32,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// MCP tool call parameters
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call (e.g., "log_upsert")
    pub name: String,
    /// Arguments to pass to the tool
    #[serde(default)]
    pub arguments: Value,
}

/// MCP tool call result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Tool execution results
    pub content: Vec<ToolContent>,
    /// Whether this is an error result
    pub is_error: bool,
}

/// Content returned by a tool
#[derive(Debug, Serialize)]
pub struct ToolContent {
    /// Type of content (always "text" here)
    #[serde(rename = "type")]
    pub content_type: String,
    /// The actual content/result
    pub text: String,
}

/// MCP tool definition, as listed by `tools/list`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

impl From<ToolInfo> for ToolDefinition {
    fn from(info: ToolInfo) -> Self {
        Self {
            name: info.name.to_string(),
            description: info.description.to_string(),
            input_schema: info.input_schema,
        }
    }
}

/// What the server supports
#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    /// Whether the tool list can change while connected
    pub list_changed: bool,
}

/// MCP initialization request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitializeParams {
    /// MCP protocol version the client supports
    pub protocol_version: Option<String>,
    #[allow(dead_code)]
    pub capabilities: Value,
    pub client_info: Option<ClientInfo>,
}

/// Information about the MCP client
#[derive(Debug, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

/// MCP initialization response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

// JSON-RPC error codes
pub mod error_codes {
    /// Parse error - Invalid JSON was received by the server
    pub const PARSE_ERROR: i32 = -32700;
    /// Invalid Request - The JSON sent is not a valid Request object
    pub const INVALID_REQUEST: i32 = -32600;
    /// Method not found - The requested method doesn't exist
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid parameters - Method exists but parameters are wrong
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error - Internal JSON-RPC error
    pub const INTERNAL_ERROR: i32 = -32603;

    // Application-specific error codes live in -32000 to -32099
    pub const USER_NOT_FOUND: i32 = -32000;
    pub const HABIT_NOT_FOUND: i32 = -32001;
    pub const LOG_NOT_FOUND: i32 = -32002;
    /// A unique value (such as an email) is already taken
    pub const DUPLICATE: i32 = -32003;
    /// Input validation failed
    pub const VALIDATION_ERROR: i32 = -32004;
    /// Database or storage operation failed
    pub const STORAGE_ERROR: i32 = -32005;
    /// The streak could not be computed
    pub const STREAK_ERROR: i32 = -32006;
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Value, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data,
            }),
        }
    }
}

impl ToolCallResult {
    /// Create a successful tool result with text content
    pub fn success(text: String) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text,
            }],
            is_error: false,
        }
    }

    /// Create an error tool result
    ///
    /// The text is a JSON object carrying the error code, its symbolic name
    /// and the message, so clients can branch on the code.
    pub fn error(error: &ToolError) -> Self {
        let (code, kind) = tool_error_code(error);
        let body = json!({
            "code": code,
            "error": kind,
            "message": error.to_string(),
        });

        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: body.to_string(),
            }],
            is_error: true,
        }
    }
}

/// Map a storage error to its JSON-RPC code and symbolic name
pub fn storage_error_code(error: &StorageError) -> (i32, &'static str) {
    match error {
        StorageError::UserNotFound { .. } => (error_codes::USER_NOT_FOUND, "USER_NOT_FOUND"),
        StorageError::HabitNotFound { .. } => (error_codes::HABIT_NOT_FOUND, "HABIT_NOT_FOUND"),
        StorageError::LogNotFound { .. } => (error_codes::LOG_NOT_FOUND, "LOG_NOT_FOUND"),
        StorageError::DuplicateEmail { .. } => (error_codes::DUPLICATE, "DUPLICATE"),
        StorageError::Query(_) | StorageError::Connection(_) | StorageError::Migration(_) => {
            (error_codes::STORAGE_ERROR, "STORAGE")
        }
    }
}

/// Map a tool error to its JSON-RPC code and symbolic name
pub fn tool_error_code(error: &ToolError) -> (i32, &'static str) {
    match error {
        ToolError::InvalidParams(_) | ToolError::Domain(_) => {
            (error_codes::VALIDATION_ERROR, "VALIDATION")
        }
        ToolError::Storage(err) => storage_error_code(err),
        ToolError::Streak(_) => (error_codes::STREAK_ERROR, "STREAK"),
        ToolError::UnknownTool(_) => (error_codes::INVALID_PARAMS, "UNKNOWN_TOOL"),
        ToolError::Serialization(_) => (error_codes::INTERNAL_ERROR, "INTERNAL"),
    }
}
