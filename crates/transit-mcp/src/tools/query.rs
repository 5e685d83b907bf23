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

//! Record query tool.

use crate::error::McpResult;
use crate::protocol::CallToolResult;
use crate::tools::helpers::{parse_args, require_non_blank};
use crate::tools::types::{attribution, QueryDataArgs, ToolContext};
use serde_json::{json, Value as JsonValue};
use tracing::debug;
use transit_core::normalize_file_name;

/// Execute query_data tool.
///
/// Distinguishes an unknown agency from a missing file so the caller can
/// recover; an existing file with no rows is still a success.
pub fn execute_query_data(args: Option<JsonValue>, ctx: &ToolContext) -> McpResult<CallToolResult> {
    let args: QueryDataArgs = parse_args(args)?;
    let agency_id = require_non_blank(&args.agency_id, "agency_id is required")?;
    let file_name = require_non_blank(
        &args.file_name,
        "file_name is required. Use get_agency_files to see available files.",
    )?;
    let limit = ctx.limits.apply(args.limit);

    let Some(folder) = ctx.engine.locate(agency_id) else {
        return Ok(CallToolResult::json_error(&json!({
            "error": format!("Agency '{}' not found. Use list_agencies first.", agency_id),
            "data": [],
            "count": 0
        }))?);
    };

    let catalog = ctx.engine.catalog();
    if !catalog.has_file(folder, &normalize_file_name(file_name)) {
        let available_files = catalog.list_files(folder);
        return Ok(CallToolResult::json_error(&json!({
            "error": format!(
                "File '{}' not found for agency '{}'. Available files: {}",
                file_name,
                folder,
                available_files.join(", ")
            ),
            "data": [],
            "count": 0,
            "available_files": available_files
        }))?);
    }

    let data = ctx.engine.query_file(agency_id, file_name, limit);
    debug!("query_data {}/{} -> {} rows", folder, file_name, data.len());

    let mut message = format!("Retrieved {} records", data.len());
    if data.len() == limit {
        message.push_str(&format!(" (limited to {})", limit));
    }

    Ok(CallToolResult::json(&json!({
        "count": data.len(),
        "data": data,
        "agency_id": agency_id,
        "file_name": file_name,
        "limit_applied": limit,
        "message": message,
        "attribution": attribution()
    }))?)
}
