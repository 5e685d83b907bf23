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

//! Transit Model Context Protocol (MCP) Server
//!
//! Exposes the Statistics Canada Canadian Public Transit Network Database (a
//! directory of per-agency GTFS feeds) to AI/LLM clients as four tools:
//!
//! - **describe_dataset**: agency count and every file type in the dataset
//! - **list_agencies**: list or search agencies by name, folder or URL
//! - **get_agency_files**: files available for one agency
//! - **query_data**: bounded records from any file of any agency
//!
//! Agency identifiers are resolved through [`transit_core::QueryEngine`], so
//! folder names, full names and acronyms are all accepted.

mod error;
mod protocol;
mod rate_limiter;
mod server;
pub mod tools;

pub use error::{McpError, McpResult};
pub use protocol::*;
pub use rate_limiter::RateLimiter;
pub use server::{McpServer, McpServerConfig};
pub use tools::{execute_tool, get_tools, QueryLimits, ToolContext};

/// MCP Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name for MCP protocol
pub const SERVER_NAME: &str = "transit-mcp";

/// MCP protocol revision implemented by the server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Default dataset root inside the published container image.
pub const DEFAULT_DATA_DIR: &str = "/app/data/canadian_public_transit_network_database/gtfs";
