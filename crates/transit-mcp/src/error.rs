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

//! Error types for the MCP server.

use thiserror::Error;

/// MCP server error type.
///
/// Every variant maps to a JSON-RPC error code through [`McpError::code`].
#[derive(Error, Debug)]
pub enum McpError {
    /// Malformed JSON on the wire or in a result.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading stdin or writing stdout failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Well-formed JSON that is not a JSON-RPC 2.0 request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or malformed method params.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// No handler for the requested method.
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool arguments failed to deserialize or validate.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Result type for MCP operations.
pub type McpResult<T> = Result<T, McpError>;

impl McpError {
    /// JSON-RPC error code for this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::Json(_) => -32700,
            Self::InvalidRequest(_) => -32600,
            Self::Io(_) => -32603,
            Self::InvalidParams(_) | Self::InvalidArguments(_) => -32602,
            Self::MethodNotFound(_) | Self::ToolNotFound(_) => -32601,
        }
    }
}
