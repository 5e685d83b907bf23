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

//! Helper functions shared across MCP tools.

use crate::error::{McpError, McpResult};
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Parse JSON arguments into a typed structure.
pub fn parse_args<T: for<'de> Deserialize<'de>>(args: Option<JsonValue>) -> McpResult<T> {
    let args = args.unwrap_or(JsonValue::Object(serde_json::Map::new()));
    serde_json::from_value(args).map_err(|e| McpError::InvalidArguments(e.to_string()))
}

/// Reject a blank required string argument.
pub fn require_non_blank<'a>(value: &'a str, message: &str) -> McpResult<&'a str> {
    if value.trim().is_empty() {
        Err(McpError::InvalidArguments(message.to_string()))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_args_valid() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct TestArgs {
            name: String,
            count: i32,
        }

        let args = json!({ "name": "test", "count": 42 });
        let parsed: TestArgs = parse_args(Some(args)).unwrap();

        assert_eq!(parsed.name, "test");
        assert_eq!(parsed.count, 42);
    }

    #[test]
    fn test_parse_args_wrong_type() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct TestArgs {
            agency_id: String,
        }

        let result: McpResult<TestArgs> = parse_args(Some(json!({ "agency_id": 7 })));
        assert!(matches!(result, Err(McpError::InvalidArguments(_))));
    }

    #[test]
    fn test_parse_args_none() {
        #[derive(Debug, serde::Deserialize, Default)]
        struct TestArgs {
            #[serde(default)]
            optional: String,
        }

        let parsed: TestArgs = parse_args(None).unwrap();
        assert_eq!(parsed.optional, "");
    }

    #[test]
    fn test_require_non_blank() {
        assert_eq!(require_non_blank("ttc", "required").unwrap(), "ttc");
        assert!(require_non_blank("", "required").is_err());

        let err = require_non_blank("   ", "agency_id is required").unwrap_err();
        assert_eq!(err.to_string(), "Invalid arguments: agency_id is required");
    }
}
