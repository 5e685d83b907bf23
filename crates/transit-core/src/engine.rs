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

//! Query engine over the catalog and alias index.

use crate::alias::AliasIndex;
use crate::catalog::Catalog;
use crate::record::{AgencyRecord, Record};
use crate::{normalize_file_name, CORE_FILES};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Overview of the whole dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    /// Number of agency folders.
    pub total_agencies: usize,
    /// Number of distinct file names across all agencies.
    pub total_file_types: usize,
    /// Every distinct file name seen in any agency, sorted.
    pub all_available_files: Vec<String>,
    /// File names every GTFS feed is expected to provide.
    pub core_files: Vec<String>,
}

/// An agency returned by [`QueryEngine::search_agencies`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgencyMatch {
    /// Descriptive record of the agency.
    #[serde(flatten)]
    pub agency: AgencyRecord,
    /// Number of data files in the agency folder.
    pub available_files: usize,
}

/// Agency resolution and bounded file queries.
///
/// Cheap to create; the catalog and the alias index are populated on first
/// use. Share one engine behind an `Arc` to reuse its caches across threads.
///
/// # Examples
///
/// ```no_run
/// use transit_core::QueryEngine;
///
/// let engine = QueryEngine::open("/data/gtfs");
/// let montreal = engine.search_agencies(Some("montreal"));
/// println!("{} matches", montreal.len());
/// ```
#[derive(Debug)]
pub struct QueryEngine {
    catalog: Catalog,
    aliases: OnceLock<AliasIndex>,
}

impl QueryEngine {
    /// Create an engine over an existing catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            aliases: OnceLock::new(),
        }
    }

    /// Create an engine over the dataset rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::new(Catalog::new(root))
    }

    /// Underlying catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Alias index, built on first call.
    pub fn alias_index(&self) -> &AliasIndex {
        self.aliases.get_or_init(|| {
            let index = AliasIndex::build(&self.catalog);
            info!(
                "Built alias index: {} aliases for {} agencies",
                index.len(),
                self.catalog.list_agency_folders().len()
            );
            index
        })
    }

    /// Canonical folder for `identifier`.
    ///
    /// An exact, case-sensitive folder name wins over any alias; otherwise the
    /// lowercased identifier is looked up in the alias index. Empty input
    /// resolves to nothing.
    pub fn resolve(&self, identifier: &str) -> Option<&str> {
        if identifier.is_empty() {
            return None;
        }

        if let Some(folder) = self
            .catalog
            .list_agency_folders()
            .iter()
            .find(|folder| *folder == identifier)
        {
            return Some(folder.as_str());
        }

        self.alias_index().lookup(identifier)
    }

    /// Like [`resolve`](Self::resolve), falling back to the first agency whose
    /// folder, name or URL contains `identifier`.
    ///
    /// An empty identifier locates nothing, even though every agency would
    /// contain it.
    pub fn locate(&self, identifier: &str) -> Option<&str> {
        if identifier.is_empty() {
            return None;
        }

        self.resolve(identifier).or_else(|| {
            let needle = identifier.to_lowercase();
            self.catalog
                .list_agency_folders()
                .iter()
                .find(|folder| {
                    self.catalog
                        .load_agency_record(folder)
                        .is_some_and(|agency| matches_query(&agency, &needle))
                })
                .map(String::as_str)
        })
    }

    /// Dataset overview. The file union is recomputed on every call.
    pub fn describe_dataset(&self) -> DatasetSummary {
        let folders = self.catalog.list_agency_folders();
        let files: BTreeSet<String> = folders
            .par_iter()
            .flat_map_iter(|folder| self.catalog.list_files(folder))
            .collect();

        DatasetSummary {
            total_agencies: folders.len(),
            total_file_types: files.len(),
            all_available_files: files.into_iter().collect(),
            core_files: CORE_FILES.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Agencies with a loadable record, in enumeration order.
    ///
    /// With a non-empty `query`, keeps agencies whose folder, name or URL
    /// contains it, ignoring case. Agencies without a record are skipped.
    pub fn search_agencies(&self, query: Option<&str>) -> Vec<AgencyMatch> {
        let needle = query.filter(|q| !q.is_empty()).map(str::to_lowercase);

        self.catalog
            .list_agency_folders()
            .par_iter()
            .filter_map(|folder| {
                let agency = self.catalog.load_agency_record(folder)?;
                if let Some(needle) = &needle {
                    if !matches_query(&agency, needle) {
                        return None;
                    }
                }
                Some(AgencyMatch {
                    agency: (*agency).clone(),
                    available_files: self.catalog.list_files(folder).len(),
                })
            })
            .collect()
    }

    /// Data files of the agency `identifier` resolves to; empty if none.
    pub fn list_agency_files(&self, identifier: &str) -> Vec<String> {
        match self.resolve(identifier) {
            Some(folder) => self.catalog.list_files(folder),
            None => Vec::new(),
        }
    }

    /// Up to `limit` rows of `file_name` for the agency `identifier` locates.
    ///
    /// `file_name` may omit the `.txt` extension. Unknown agencies and files
    /// give an empty result, as does an empty `identifier` (it never falls
    /// back to the first agency); a failed read returns the rows read before it.
    /// Rows past `limit` are never read.
    pub fn query_file(&self, identifier: &str, file_name: &str, limit: usize) -> Vec<Record> {
        let Some(folder) = self.locate(identifier) else {
            debug!("No agency matches {:?}", identifier);
            return Vec::new();
        };

        let file_name = normalize_file_name(file_name);
        let rows = self.catalog.read_records(folder, &file_name, limit);
        debug!(
            "Read {} rows of {} for {} (limit {})",
            rows.len(),
            file_name,
            folder,
            limit
        );
        rows
    }
}

/// Case-insensitive substring test over folder, name and URL.
///
/// `needle` must already be lowercase.
fn matches_query(agency: &AgencyRecord, needle: &str) -> bool {
    format!("{} {} {}", agency.folder_name(), agency.name(), agency.url())
        .to_lowercase()
        .contains(needle)
}
