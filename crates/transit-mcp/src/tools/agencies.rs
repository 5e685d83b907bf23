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

//! Agency listing and per-agency file tools.

use crate::error::McpResult;
use crate::protocol::CallToolResult;
use crate::tools::helpers::{parse_args, require_non_blank};
use crate::tools::types::{
    attribution, AgencyFilesArgs, ListAgenciesArgs, ToolContext, MAX_LISTED_AGENCIES,
};
use serde_json::{json, Value as JsonValue};
use transit_core::CORE_FILES;

/// Execute list_agencies tool.
pub fn execute_list_agencies(
    args: Option<JsonValue>,
    ctx: &ToolContext,
) -> McpResult<CallToolResult> {
    let args: ListAgenciesArgs = parse_args(args)?;
    let query = args.query.as_deref().filter(|q| !q.is_empty());
    let matches = ctx.engine.search_agencies(query);

    if matches.is_empty() {
        let message = match query {
            Some(q) => format!("No agencies found matching '{}'", q),
            None => "No agencies found".to_string(),
        };
        return Ok(CallToolResult::json(&json!({
            "agencies": [],
            "count": 0,
            "message": message
        }))?);
    }

    let agencies: Vec<JsonValue> = matches
        .iter()
        .take(MAX_LISTED_AGENCIES)
        .map(|m| {
            let name = match m.agency.name() {
                "" => "Unknown",
                name => name,
            };
            json!({
                "agency_id": m.agency.folder_name(),
                "name": name,
                "url": m.agency.url(),
                "phone": m.agency.phone(),
                "available_files": m.available_files
            })
        })
        .collect();

    Ok(CallToolResult::json(&json!({
        "count": matches.len(),
        "showing": agencies.len(),
        "agencies": agencies,
        "message": format!(
            "Found {} agencies. Use get_agency_files to see available data files.",
            matches.len()
        ),
        "attribution": attribution()
    }))?)
}

/// Execute get_agency_files tool.
pub fn execute_get_agency_files(
    args: Option<JsonValue>,
    ctx: &ToolContext,
) -> McpResult<CallToolResult> {
    let args: AgencyFilesArgs = parse_args(args)?;
    let agency_id = require_non_blank(&args.agency_id, "agency_id is required")?;

    if ctx.engine.resolve(agency_id).is_none() {
        return Ok(CallToolResult::json_error(&json!({
            "error": format!(
                "Agency '{}' not found. Use list_agencies to find valid IDs.",
                agency_id
            ),
            "files": []
        }))?);
    }

    let files = ctx.engine.list_agency_files(agency_id);
    let core_files: Vec<&String> = files
        .iter()
        .filter(|f| CORE_FILES.contains(&f.as_str()))
        .collect();

    Ok(CallToolResult::json(&json!({
        "agency_id": agency_id,
        "files": files,
        "count": files.len(),
        "core_files": core_files,
        "message": format!(
            "Agency has {} GTFS files. Use query_data with file_name to get data.",
            files.len()
        )
    }))?)
}
