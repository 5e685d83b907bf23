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

//! Shared types for MCP tools.

use serde::Deserialize;
use std::sync::Arc;
use transit_core::QueryEngine;

// ============ Dataset Attribution ============

pub const DATASET_NAME: &str = "Canadian Public Transit Network Database";
pub const DATASET_SOURCE: &str = "Statistics Canada";
pub const DATASET_URL: &str =
    "https://www150.statcan.gc.ca/n1/pub/23-26-0003/232600032025001-eng.htm";
pub const LICENCE: &str = "Open Government Licence - Canada";
pub const LICENCE_URL: &str = "https://open.canada.ca/en/open-government-licence-canada";
pub const USAGE: &str = "Use list_agencies to find agencies, get_agency_files to see available files, then query_data to get any file";

/// Attribution line attached to listing and query results.
pub fn attribution() -> String {
    format!("Data from {} - {}", DATASET_SOURCE, LICENCE)
}

/// Maximum number of agencies shown by `list_agencies`.
pub const MAX_LISTED_AGENCIES: usize = 100;

// ============ Tool Context ============

/// Row limits applied to `query_data` before it reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Limit used when the caller gives none (or a non-positive one).
    pub default_limit: usize,
    /// Hard ceiling on any requested limit.
    pub max_limit: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_limit: 5_000,
            max_limit: 100_000,
        }
    }
}

impl QueryLimits {
    /// Effective limit for a caller-supplied value.
    ///
    /// Missing, non-finite and non-positive values take the default;
    /// fractions are truncated; everything is capped at `max_limit`.
    pub fn apply(&self, requested: Option<f64>) -> usize {
        let limit = match requested {
            Some(n) if n.is_finite() && n >= 1.0 => n as usize,
            _ => self.default_limit,
        };
        limit.min(self.max_limit)
    }
}

/// Everything a tool needs to run.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub engine: Arc<QueryEngine>,
    pub limits: QueryLimits,
}

impl ToolContext {
    pub fn new(engine: Arc<QueryEngine>, limits: QueryLimits) -> Self {
        Self { engine, limits }
    }
}

// ============ Argument Structures ============

#[derive(Debug, Default, Deserialize)]
pub struct ListAgenciesArgs {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AgencyFilesArgs {
    #[serde(default)]
    pub agency_id: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryDataArgs {
    #[serde(default)]
    pub agency_id: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub limit: Option<f64>,
}
