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

//! Declarative macros for tool input schemas.
//!
//! ```text
//! tool_schema! {
//!     required: ["agency_id"],
//!     properties: {
//!         agency_id: agency_id_arg!(),
//!         limit: schema_integer!("Max records", default: 5000)
//!     }
//! }
//! ```

/// JSON schema for a described string.
#[macro_export]
macro_rules! schema_string {
    ($description:expr) => {
        serde_json::json!({
            "type": "string",
            "description": $description
        })
    };
}

/// JSON schema for an integer, optionally with a default and bounds.
#[macro_export]
macro_rules! schema_integer {
    ($description:expr) => {
        serde_json::json!({
            "type": "integer",
            "description": $description
        })
    };
    ($description:expr, default: $default:expr, minimum: $min:expr, maximum: $max:expr) => {
        serde_json::json!({
            "type": "integer",
            "description": $description,
            "default": $default,
            "minimum": $min,
            "maximum": $max
        })
    };
}

/// Complete tool schema. `properties` may be empty.
#[macro_export]
macro_rules! tool_schema {
    (
        required: [$($req:expr),* $(,)?],
        properties: {
            $($field:ident: $schema:expr),* $(,)?
        }
    ) => {
        serde_json::json!({
            "type": "object",
            "properties": {
                $(stringify!($field): $schema),*
            },
            "required": [$($req),*]
        })
    };
}

/// The `agency_id` argument shared by the per-agency tools.
#[macro_export]
macro_rules! agency_id_arg {
    () => {
        $crate::schema_string!(
            "Agency ID from list_agencies. Folder names, full agency names and acronyms (e.g. 'stm') are accepted."
        )
    };
}
