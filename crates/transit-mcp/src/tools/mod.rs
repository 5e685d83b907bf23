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

//! Transit tools for MCP server.
//!
//! Available tools:
//! - `describe_dataset`: Dataset overview with every file type present
//! - `list_agencies`: List or search agencies
//! - `get_agency_files`: Files available for one agency
//! - `query_data`: Bounded records from any file of an agency

mod agencies;
mod dataset;
mod helpers;
mod query;
#[macro_use]
mod schema_macros;
mod types;

// Re-export public APIs
pub use agencies::{execute_get_agency_files, execute_list_agencies};
pub use dataset::execute_describe_dataset;
pub use query::execute_query_data;
pub use types::{
    attribution, QueryLimits, ToolContext, DATASET_NAME, DATASET_SOURCE, LICENCE,
    MAX_LISTED_AGENCIES,
};

use crate::error::{McpError, McpResult};
use crate::protocol::{CallToolResult, Tool};
use serde_json::Value as JsonValue;

/// Get all available transit tools.
///
/// The `limit` schema advertises the limits in `limits`.
pub fn get_tools(limits: &QueryLimits) -> Vec<Tool> {
    vec![
        Tool {
            name: "describe_dataset".to_string(),
            description: "Get dataset overview: total agencies, all available GTFS file types, and usage instructions.".to_string(),
            input_schema: tool_schema! {
                required: [],
                properties: {}
            },
        },
        Tool {
            name: "list_agencies".to_string(),
            description: "List all transit agencies or search by name, folder or URL. Returns agency IDs and file counts.".to_string(),
            input_schema: tool_schema! {
                required: [],
                properties: {
                    query: schema_string!("Optional: search term (e.g., 'Montreal', 'BC', 'Ontario')")
                }
            },
        },
        Tool {
            name: "get_agency_files".to_string(),
            description: "List all available GTFS files for a specific agency, highlighting the core files.".to_string(),
            input_schema: tool_schema! {
                required: ["agency_id"],
                properties: {
                    agency_id: agency_id_arg!()
                }
            },
        },
        Tool {
            name: "query_data".to_string(),
            description: "Get data from ANY GTFS file for any agency (agency, routes, stops, stop_times, trips, shapes, calendar, transfers, ...). Returns records as JSON with every value as text.".to_string(),
            input_schema: tool_schema! {
                required: ["agency_id", "file_name"],
                properties: {
                    agency_id: agency_id_arg!(),
                    file_name: schema_string!("File name (e.g., 'stops', 'routes', 'transfers.txt'). Can omit .txt extension."),
                    limit: schema_integer!(
                        format!("Max records (default {}, max {})", limits.default_limit, limits.max_limit),
                        default: limits.default_limit,
                        minimum: 1,
                        maximum: limits.max_limit
                    )
                }
            },
        },
    ]
}

/// Execute a tool by name.
pub fn execute_tool(
    name: &str,
    arguments: Option<JsonValue>,
    ctx: &ToolContext,
) -> McpResult<CallToolResult> {
    match name {
        "describe_dataset" => execute_describe_dataset(ctx),
        "list_agencies" => execute_list_agencies(arguments, ctx),
        "get_agency_files" => execute_get_agency_files(arguments, ctx),
        "query_data" => execute_query_data(arguments, ctx),
        _ => Err(McpError::ToolNotFound(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;
    use transit_core::QueryEngine;

    fn fixture() -> (TempDir, ToolContext) {
        let dir = TempDir::new().unwrap();
        let ttc = dir.path().join("ttc");
        fs::create_dir(&ttc).unwrap();
        fs::write(
            ttc.join("agency.txt"),
            "agency_id,agency_name,agency_url,agency_phone\n1,Toronto Transit Commission,http://www.ttc.ca,416-393-4636\n",
        )
        .unwrap();
        fs::write(
            ttc.join("stops.txt"),
            "stop_id,stop_name\n1,Union\n2,King\n3,Queen\n",
        )
        .unwrap();
        fs::write(ttc.join("shapes.txt"), "shape_id,shape_pt_lat\n").unwrap();

        let ctx = ToolContext::new(
            Arc::new(QueryEngine::open(dir.path())),
            QueryLimits::default(),
        );
        (dir, ctx)
    }

    fn body(result: &CallToolResult) -> JsonValue {
        serde_json::from_str(result.text().unwrap()).unwrap()
    }

    #[test]
    fn test_get_tools_returns_all_tools() {
        let tools = get_tools(&QueryLimits::default());
        let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();

        assert_eq!(
            names,
            ["describe_dataset", "list_agencies", "get_agency_files", "query_data"]
        );
    }

    #[test]
    fn test_tool_schemas_valid() {
        for tool in get_tools(&QueryLimits::default()) {
            assert!(!tool.description.is_empty(), "{} has no description", tool.name);
            assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
            assert!(tool.input_schema["properties"].is_object(), "{}", tool.name);
        }
    }

    #[test]
    fn test_limit_schema_follows_limits() {
        let limits = QueryLimits {
            default_limit: 10,
            max_limit: 20,
        };
        let tools = get_tools(&limits);
        let limit = &tools[3].input_schema["properties"]["limit"];

        assert_eq!(limit["default"], 10);
        assert_eq!(limit["maximum"], 20);
    }

    #[test]
    fn test_execute_tool_unknown() {
        let (_dir, ctx) = fixture();
        match execute_tool("unknown_tool", None, &ctx) {
            Err(McpError::ToolNotFound(name)) => assert_eq!(name, "unknown_tool"),
            other => panic!("Expected ToolNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_describe_dataset() {
        let (_dir, ctx) = fixture();
        let result = execute_tool("describe_dataset", None, &ctx).unwrap();
        let body = body(&result);

        assert!(result.is_error.is_none());
        assert_eq!(body["total_agencies"], 1);
        assert_eq!(body["total_file_types"], 3);
        assert_eq!(
            body["all_available_files"],
            json!(["agency.txt", "shapes.txt", "stops.txt"])
        );
        assert_eq!(body["licence"], LICENCE);
    }

    #[test]
    fn test_list_agencies_no_match() {
        let (_dir, ctx) = fixture();
        let result =
            execute_tool("list_agencies", Some(json!({ "query": "vancouver" })), &ctx).unwrap();
        let body = body(&result);

        assert_eq!(body["count"], 0);
        assert_eq!(body["message"], "No agencies found matching 'vancouver'");
    }

    #[test]
    fn test_list_agencies_fields() {
        let (_dir, ctx) = fixture();
        let result = execute_tool("list_agencies", None, &ctx).unwrap();
        let body = body(&result);

        assert_eq!(body["count"], 1);
        assert_eq!(body["showing"], 1);
        let agency = &body["agencies"][0];
        assert_eq!(agency["agency_id"], "ttc");
        assert_eq!(agency["name"], "Toronto Transit Commission");
        assert_eq!(agency["phone"], "416-393-4636");
        assert_eq!(agency["available_files"], 3);
        assert_eq!(body["attribution"], attribution());
    }

    #[test]
    fn test_get_agency_files_core_subset() {
        let (_dir, ctx) = fixture();
        let result =
            execute_tool("get_agency_files", Some(json!({ "agency_id": "ttc" })), &ctx).unwrap();
        let body = body(&result);

        assert_eq!(body["count"], 3);
        assert_eq!(body["core_files"], json!(["agency.txt", "stops.txt"]));
    }

    #[test]
    fn test_get_agency_files_unknown() {
        let (_dir, ctx) = fixture();
        let result =
            execute_tool("get_agency_files", Some(json!({ "agency_id": "nope" })), &ctx).unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            body(&result)["error"],
            "Agency 'nope' not found. Use list_agencies to find valid IDs."
        );
    }

    #[test]
    fn test_blank_agency_id_rejected() {
        let (_dir, ctx) = fixture();
        let result = execute_tool("get_agency_files", Some(json!({ "agency_id": "  " })), &ctx);
        assert!(matches!(result, Err(McpError::InvalidArguments(_))));

        let result = execute_tool("query_data", Some(json!({ "agency_id": "ttc" })), &ctx);
        assert!(matches!(result, Err(McpError::InvalidArguments(_))));
    }

    #[test]
    fn test_query_data_limited() {
        let (_dir, ctx) = fixture();
        let args = json!({ "agency_id": "ttc", "file_name": "stops", "limit": 2 });
        let result = execute_tool("query_data", Some(args), &ctx).unwrap();
        let body = body(&result);

        assert_eq!(body["count"], 2);
        assert_eq!(body["limit_applied"], 2);
        assert_eq!(body["message"], "Retrieved 2 records (limited to 2)");
        assert_eq!(body["data"][0]["stop_name"], "Union");
        assert_eq!(body["data"][0]["stop_id"], "1");
    }

    #[test]
    fn test_query_data_default_limit() {
        let (_dir, ctx) = fixture();
        let args = json!({ "agency_id": "Toronto Transit Commission", "file_name": "stops.txt" });
        let result = execute_tool("query_data", Some(args), &ctx).unwrap();
        let body = body(&result);

        assert_eq!(body["count"], 3);
        assert_eq!(body["limit_applied"], 5000);
        assert_eq!(body["message"], "Retrieved 3 records");
    }

    #[test]
    fn test_query_data_header_only_file() {
        let (_dir, ctx) = fixture();
        let args = json!({ "agency_id": "ttc", "file_name": "shapes" });
        let result = execute_tool("query_data", Some(args), &ctx).unwrap();

        assert!(result.is_error.is_none());
        assert_eq!(body(&result)["count"], 0);
    }

    #[test]
    fn test_query_data_missing_file() {
        let (_dir, ctx) = fixture();
        let args = json!({ "agency_id": "ttc", "file_name": "fare_rules" });
        let result = execute_tool("query_data", Some(args), &ctx).unwrap();
        let body = body(&result);

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            body["available_files"],
            json!(["agency.txt", "shapes.txt", "stops.txt"])
        );
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("File 'fare_rules' not found for agency 'ttc'"));
    }

    #[test]
    fn test_query_data_unknown_agency() {
        let (_dir, ctx) = fixture();
        let args = json!({ "agency_id": "oc transpo", "file_name": "stops" });
        let result = execute_tool("query_data", Some(args), &ctx).unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            body(&result)["error"],
            "Agency 'oc transpo' not found. Use list_agencies first."
        );
    }
}
