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

//! Dataset overview tool.

use crate::error::McpResult;
use crate::protocol::CallToolResult;
use crate::tools::types::{
    ToolContext, DATASET_NAME, DATASET_SOURCE, DATASET_URL, LICENCE, LICENCE_URL, USAGE,
};
use serde_json::json;

/// Execute describe_dataset tool.
pub fn execute_describe_dataset(ctx: &ToolContext) -> McpResult<CallToolResult> {
    let summary = ctx.engine.describe_dataset();

    Ok(CallToolResult::json(&json!({
        "dataset": DATASET_NAME,
        "source": DATASET_SOURCE,
        "url": DATASET_URL,
        "licence": LICENCE,
        "licence_url": LICENCE_URL,
        "total_agencies": summary.total_agencies,
        "total_file_types": summary.total_file_types,
        "all_available_files": summary.all_available_files,
        "core_files": summary.core_files,
        "usage": USAGE,
        "note": format!(
            "All {} file types are supported. Use get_agency_files to see which files each agency has.",
            summary.total_file_types
        )
    }))?)
}
