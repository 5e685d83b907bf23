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

//! Read-only access to a directory of per-agency GTFS feeds.
//!
//! The dataset root holds one directory per transit agency, each containing
//! comma-delimited `.txt` files with a header row. This crate provides:
//!
//! - **[`Catalog`]**: a snapshot of agency folders and their files, plus a
//!   per-agency cache of the descriptive `agency.txt` record
//! - **[`AliasIndex`]**: fuzzy identifier lookup by folder name, full agency
//!   name, or an acronym derived from the name
//! - **[`QueryEngine`]**: agency search, dataset description and bounded
//!   record streaming from any file of an agency
//!
//! Nothing in the public API fails on missing or malformed data. Absent
//! agencies and files yield empty results; unreadable files are logged
//! through `tracing` and degrade to whatever could be read.
//!
//! # Examples
//!
//! ```no_run
//! use transit_core::QueryEngine;
//!
//! let engine = QueryEngine::open("/data/gtfs");
//!
//! // Folder name, full name or acronym all resolve to the same agency.
//! let folder = engine.resolve("TTC");
//!
//! // First ten stops, every value kept as text.
//! let stops = engine.query_file("ttc", "stops", 10);
//! for row in &stops {
//!     println!("{:?}", row.get("stop_name"));
//! }
//! ```

mod alias;
mod catalog;
mod engine;
mod error;
mod record;

pub use alias::{derive_acronym, AliasIndex};
pub use catalog::Catalog;
pub use engine::{AgencyMatch, DatasetSummary, QueryEngine};
pub use error::{CatalogError, Result};
pub use record::{AgencyRecord, Record};

/// Extension shared by every data file in an agency folder.
pub const FILE_EXTENSION: &str = ".txt";

/// Name of the single-row descriptive file in each agency folder.
pub const AGENCY_FILE: &str = "agency.txt";

/// Field injected into every [`AgencyRecord`] holding the canonical folder.
pub const FOLDER_NAME_FIELD: &str = "folder_name";

/// Display-name column of `agency.txt`.
pub const AGENCY_NAME_FIELD: &str = "agency_name";

/// Contact URL column of `agency.txt`.
pub const AGENCY_URL_FIELD: &str = "agency_url";

/// Phone column of `agency.txt`.
pub const AGENCY_PHONE_FIELD: &str = "agency_phone";

/// Files every GTFS feed is expected to provide.
pub const CORE_FILES: [&str; 5] = [
    "agency.txt",
    "routes.txt",
    "stops.txt",
    "stop_times.txt",
    "trips.txt",
];

/// Append [`FILE_EXTENSION`] unless the name already carries it.
///
/// # Examples
///
/// ```
/// use transit_core::normalize_file_name;
///
/// assert_eq!(normalize_file_name("stops"), "stops.txt");
/// assert_eq!(normalize_file_name("stops.txt"), "stops.txt");
/// ```
pub fn normalize_file_name(file_name: &str) -> String {
    if file_name.ends_with(FILE_EXTENSION) {
        file_name.to_string()
    } else {
        format!("{}{}", file_name, FILE_EXTENSION)
    }
}
