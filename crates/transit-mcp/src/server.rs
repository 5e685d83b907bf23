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

//! MCP Server implementation.

use crate::error::{McpError, McpResult};
use crate::protocol::*;
use crate::rate_limiter::RateLimiter;
use crate::tools::{
    execute_tool, get_tools, QueryLimits, ToolContext, DATASET_NAME, DATASET_SOURCE, LICENCE,
};
use crate::{DEFAULT_DATA_DIR, PROTOCOL_VERSION, SERVER_NAME, VERSION};
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tracing::{debug, error, info, warn};
use transit_core::{DatasetSummary, QueryEngine};

/// JSON-RPC error code for requests rejected by the rate limiter.
const RATE_LIMITED: i32 = -32005;

/// MCP Server configuration.
#[derive(Debug, Clone)]
pub struct McpServerConfig {
    /// Dataset root: one sub-directory per agency.
    pub data_dir: PathBuf,

    /// Server name reported in protocol handshake.
    pub name: String,

    /// Server version reported in protocol handshake.
    pub version: String,

    /// Maximum token bucket capacity (burst size).
    ///
    /// Default: 200 requests. Set to 0 to disable rate limiting.
    pub rate_limit_burst: usize,

    /// Token refill rate (requests per second).
    ///
    /// Default: 100 requests/second.
    pub rate_limit_per_second: usize,

    /// Row limits for `query_data`.
    pub limits: QueryLimits,
}

impl Default for McpServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            name: SERVER_NAME.to_string(),
            version: VERSION.to_string(),
            rate_limit_burst: 200,
            rate_limit_per_second: 100,
            limits: QueryLimits::default(),
        }
    }
}

/// Transit MCP Server.
///
/// JSON-RPC 2.0 over line-delimited stdio. One request per line in, one
/// response per line out; notifications are handled without a response.
/// The dataset behind the tools is read-only and shared through an
/// [`Arc<QueryEngine>`], so the server itself only tracks lifecycle and
/// rate-limit state.
pub struct McpServer {
    config: McpServerConfig,
    context: ToolContext,

    /// Set by `initialize`, cleared by `shutdown`.
    initialized: bool,

    /// None if rate limiting is disabled.
    rate_limiter: Option<RateLimiter>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Nothing is read from disk until the first request (or [`warm_up`](Self::warm_up)).
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_mcp::{McpServer, McpServerConfig};
    /// use std::path::PathBuf;
    ///
    /// let config = McpServerConfig {
    ///     data_dir: PathBuf::from("/data/gtfs"),
    ///     rate_limit_burst: 0,
    ///     ..Default::default()
    /// };
    /// let server = McpServer::new(config);
    /// assert!(!server.is_initialized());
    /// ```
    pub fn new(config: McpServerConfig) -> Self {
        let rate_limiter = if config.rate_limit_burst > 0 && config.rate_limit_per_second > 0 {
            Some(RateLimiter::new(
                config.rate_limit_burst,
                config.rate_limit_per_second,
            ))
        } else {
            None
        };

        let engine = Arc::new(QueryEngine::open(config.data_dir.clone()));
        let context = ToolContext::new(engine, config.limits);

        Self {
            config,
            context,
            initialized: false,
            rate_limiter,
        }
    }

    /// Create a new MCP server with default config over `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(McpServerConfig {
            data_dir: data_dir.into(),
            ..Default::default()
        })
    }

    pub fn config(&self) -> &McpServerConfig {
        &self.config
    }

    /// The engine serving tool calls.
    pub fn engine(&self) -> &QueryEngine {
        &self.context.engine
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Enumerate the dataset and build the alias index ahead of the first request.
    pub fn warm_up(&self) -> DatasetSummary {
        let summary = self.engine().describe_dataset();
        let aliases = self.engine().alias_index().len();
        info!(
            "Dataset at {} ready: {} agencies, {} file types, {} aliases",
            self.config.data_dir.display(),
            summary.total_agencies,
            summary.total_file_types,
            aliases
        );
        if summary.total_agencies == 0 {
            warn!(
                "No agencies found under {}; every tool will return empty results",
                self.config.data_dir.display()
            );
        }
        summary
    }

    fn check_rate_limit(&mut self) -> bool {
        match &mut self.rate_limiter {
            Some(limiter) => limiter.check_limit(),
            None => true,
        }
    }

    /// Run the server using stdio transport (synchronous).
    ///
    /// Blocks until stdin is closed.
    ///
    /// ```no_run
    /// use transit_mcp::McpServer;
    ///
    /// let mut server = McpServer::with_data_dir("/data/gtfs");
    /// server.run_stdio().expect("Server failed");
    /// ```
    pub fn run_stdio(&mut self) -> McpResult<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        let reader = BufReader::new(stdin.lock());

        info!("Transit MCP Server starting on stdio");

        for line in reader.lines() {
            let line = line?;
            if let Some(response) = self.process_line(&line)? {
                writeln!(stdout, "{}", response)?;
                stdout.flush()?;
            }
        }

        info!("stdin closed, stopping");
        Ok(())
    }

    /// Run the server using stdio transport (asynchronous).
    ///
    /// Same protocol as [`run_stdio`](Self::run_stdio) on Tokio's non-blocking
    /// stdio. Tool calls themselves run inline; the dataset is local disk.
    pub async fn run_stdio_async(&mut self) -> McpResult<()> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = AsyncBufReader::new(stdin);

        info!("Transit MCP Server starting on stdio (async)");

        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => break, // EOF
                Ok(_) => {
                    if let Some(response) = self.process_line(&line)? {
                        stdout.write_all(response.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;
                    }
                }
                Err(e) => {
                    error!("Read error: {}", e);
                    break;
                }
            }
        }

        info!("stdin closed, stopping");
        Ok(())
    }

    /// Handle one line of input, returning the serialized response if one is due.
    ///
    /// Blank lines produce nothing. Every other line costs a rate-limit
    /// token; notifications are never answered, not even when rejected.
    pub fn process_line(&mut self, line: &str) -> McpResult<Option<String>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        debug!("Received: {}", line);
        let parsed = JsonRpcRequest::parse(line);

        if !self.check_rate_limit() {
            let id = match &parsed {
                Ok(request) if request.is_notification() => {
                    debug!("Dropping rate-limited notification {}", request.method);
                    return Ok(None);
                }
                Ok(request) => request.id.clone(),
                Err(_) => None,
            };
            return frame(&self.rate_limited(id));
        }

        let request = match parsed {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected input: {}", e);
                return frame(&JsonRpcResponse::from_error(None, &e));
            }
        };

        let notification = request.is_notification();
        let response = self.handle_request(request);
        if notification {
            return Ok(None);
        }
        frame(&response)
    }

    fn rate_limited(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::error(
            id,
            RATE_LIMITED,
            "Rate limit exceeded. Too many requests.".to_string(),
            Some(json!({
                "burst_capacity": self.config.rate_limit_burst,
                "rate_per_second": self.config.rate_limit_per_second
            })),
        )
    }

    /// Handle a single JSON-RPC request.
    ///
    /// # Supported Methods
    ///
    /// - `initialize` - Protocol handshake with capability negotiation
    /// - `initialized`, `notifications/initialized` - Handshake completion
    /// - `shutdown` - Graceful server shutdown
    /// - `ping` - Liveness check
    /// - `health` - Dataset and server status
    /// - `tools/list` - List available tools
    /// - `tools/call` - Execute a specific tool
    ///
    /// Unknown methods return "Method not found" (-32601).
    pub fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params),
            "initialized" | "notifications/initialized" => self.handle_initialized(id),
            "shutdown" => self.handle_shutdown(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "health" => self.handle_health(id),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params),
            method => {
                warn!("Unknown method: {}", method);
                JsonRpcResponse::from_error(id, &McpError::MethodNotFound(method.to_string()))
            }
        }
    }

    fn handle_initialize(&mut self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = match parse_params(params) {
            Ok(params) => params,
            Err(e) => return JsonRpcResponse::from_error(id, &e),
        };

        self.initialized = true;
        info!(
            "Server initialized by {} {} (protocol {})",
            params.client_info.name, params.client_info.version, params.protocol_version
        );

        let result = InitializeResult::tools_only(
            PROTOCOL_VERSION,
            &self.config.name,
            &self.config.version,
        );

        JsonRpcResponse::encode(id, &result)
    }

    fn handle_initialized(&self, id: Option<Value>) -> JsonRpcResponse {
        info!("Client sent initialized notification");
        JsonRpcResponse::success(id, json!({}))
    }

    fn handle_shutdown(&mut self, id: Option<Value>) -> JsonRpcResponse {
        info!("Server shutting down");
        self.initialized = false;
        JsonRpcResponse::success(id, json!({}))
    }

    fn handle_health(&self, id: Option<Value>) -> JsonRpcResponse {
        let summary = self.engine().describe_dataset();
        let tools = get_tools(&self.context.limits).len();

        JsonRpcResponse::success(
            id,
            json!({
                "status": "healthy",
                "dataset": DATASET_NAME,
                "source": DATASET_SOURCE,
                "agencies": summary.total_agencies,
                "file_types": summary.total_file_types,
                "tools": tools,
                "version": self.config.version,
                "licence": LICENCE
            }),
        )
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ListToolsResult {
            tools: get_tools(&self.context.limits),
        };
        JsonRpcResponse::encode(id, &result)
    }

    /// Tool errors are returned as successful responses with `isError: true`
    /// to distinguish them from protocol-level errors.
    fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match parse_params(params) {
            Ok(params) => params,
            Err(e) => return JsonRpcResponse::from_error(id, &e),
        };

        debug!("Calling tool {}", params.name);

        let result = match execute_tool(&params.name, params.arguments, &self.context) {
            Ok(result) => result,
            Err(e) => {
                warn!("Tool {} failed: {}", params.name, e);
                CallToolResult::failure(&e)
            }
        };

        JsonRpcResponse::encode(id, &result)
    }
}

/// Deserialize required method params.
fn parse_params<T: for<'de> serde::Deserialize<'de>>(params: Option<Value>) -> McpResult<T> {
    let params = params.ok_or_else(|| McpError::InvalidParams("missing params".to_string()))?;
    serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))
}

fn frame(response: &JsonRpcResponse) -> McpResult<Option<String>> {
    let line = serde_json::to_string(response)?;
    debug!("Sending: {}", line);
    Ok(Some(line))
}
