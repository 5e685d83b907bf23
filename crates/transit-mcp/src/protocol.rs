// Dweve Transit MCP - Canadian Public Transit Network Database access
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! JSON-RPC 2.0 framing and the subset of MCP messages this server speaks.
//!
//! Only the `tools` capability is advertised. Field names follow the MCP wire
//! format (`protocolVersion`, `inputSchema`, `isError`, ...).

use crate::error::McpError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version string carried by every frame.
pub const JSONRPC_VERSION: &str = "2.0";

// ============ JSON-RPC Framing ============

/// An incoming request or notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// Absent for notifications.
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Decode one line of input.
    ///
    /// Text that is not JSON is a [`McpError::Json`] (`-32700`); JSON that is
    /// not a 2.0 request object is a [`McpError::InvalidRequest`] (`-32600`).
    pub fn parse(line: &str) -> Result<Self, McpError> {
        let value: Value = serde_json::from_str(line)?;
        let request: Self = serde_json::from_value(value)
            .map_err(|e| McpError::InvalidRequest(e.to_string()))?;

        if request.jsonrpc != JSONRPC_VERSION {
            return Err(McpError::InvalidRequest(format!(
                "unsupported jsonrpc version {:?}",
                request.jsonrpc
            )));
        }
        Ok(request)
    }

    /// Whether this is a notification (no `id`, no response expected).
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// An outgoing response: exactly one of `result` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data,
            }),
        }
    }

    /// Error response whose code and message come from `error`.
    pub fn from_error(id: Option<Value>, error: &McpError) -> Self {
        Self::error(id, error.code(), error.to_string(), None)
    }

    /// Success response carrying any serializable `result`.
    ///
    /// A result that cannot be encoded becomes an internal error (`-32603`).
    pub fn encode<T: Serialize>(id: Option<Value>, result: &T) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => Self::success(id, value),
            Err(e) => Self::error(id, -32603, format!("Internal error: {}", e), None),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

// ============ Handshake ============

/// Params of `initialize`. Client capabilities are accepted but unused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    #[serde(default)]
    pub capabilities: Value,
    #[serde(rename = "clientInfo")]
    pub client_info: ClientInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

impl InitializeResult {
    /// Handshake answer for a tools-only server with a fixed tool list.
    pub fn tools_only(protocol_version: &str, name: &str, version: &str) -> Self {
        Self {
            protocol_version: protocol_version.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: name.to_string(),
                version: version.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCapability {
    #[serde(rename = "listChanged", skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

// ============ Tools ============

/// A tool as advertised by `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResult {
    pub tools: Vec<Tool>,
}

/// Params of `tools/call`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Outcome of a tool call. Tool-level failures set `isError` rather than
/// producing a JSON-RPC error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl CallToolResult {
    /// Single text item, pretty-printed from `value`.
    pub fn json(value: &Value) -> serde_json::Result<Self> {
        Ok(Self {
            content: vec![Content::Text {
                text: serde_json::to_string_pretty(value)?,
            }],
            is_error: None,
        })
    }

    /// Like [`json`](Self::json), flagged as a tool-level error.
    pub fn json_error(value: &Value) -> serde_json::Result<Self> {
        Ok(Self {
            is_error: Some(true),
            ..Self::json(value)?
        })
    }

    /// Plain-text tool error.
    pub fn failure(error: &McpError) -> Self {
        Self {
            content: vec![Content::Text {
                text: format!("Error: {}", error),
            }],
            is_error: Some(true),
        }
    }

    /// Text of the first content item, if it is text.
    pub fn text(&self) -> Option<&str> {
        match self.content.first() {
            Some(Content::Text { text }) => Some(text),
            None => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}
