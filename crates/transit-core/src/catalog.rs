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

//! Dataset catalog: agency folders, their files and descriptive records.
//!
//! # Snapshot semantics
//!
//! The folder list is read once, on first access, and never refreshed. File
//! lists and agency records are cached per folder on first access. Only
//! folders present in the snapshot are ever touched on disk, which also keeps
//! caller-supplied names from reaching outside the dataset root.
//!
//! # Thread Safety
//!
//! The folder list sits behind a `OnceLock`. Per-folder caches use `DashMap`
//! entries, so concurrent first accesses to the same folder read the disk once.

use crate::error::{CatalogError, Result};
use crate::record::{AgencyRecord, Record};
use crate::{AGENCY_FILE, FILE_EXTENSION};
use dashmap::DashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Snapshot of the agency folders under a dataset root.
///
/// # Examples
///
/// ```no_run
/// use transit_core::Catalog;
///
/// let catalog = Catalog::new("/data/gtfs");
/// for folder in catalog.list_agency_folders() {
///     println!("{}: {:?}", folder, catalog.list_files(folder));
/// }
/// ```
#[derive(Debug)]
pub struct Catalog {
    root: PathBuf,
    folders: OnceLock<Vec<String>>,
    files: DashMap<String, Arc<[String]>>,
    agencies: DashMap<String, Option<Arc<AgencyRecord>>>,
}

impl Catalog {
    /// Create a catalog over `root`. Nothing is read until first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            folders: OnceLock::new(),
            files: DashMap::new(),
            agencies: DashMap::new(),
        }
    }

    /// Dataset root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Agency folders in directory enumeration order.
    ///
    /// Empty when the root does not exist. The order is stable for the life
    /// of the catalog but is not sorted.
    pub fn list_agency_folders(&self) -> &[String] {
        self.folders.get_or_init(|| scan_folders(&self.root))
    }

    /// Whether `folder` is an agency folder of the snapshot (case-sensitive).
    pub fn contains_folder(&self, folder: &str) -> bool {
        self.list_agency_folders().iter().any(|f| f == folder)
    }

    /// Data files of an agency folder, sorted by name.
    ///
    /// Only regular files ending in `.txt` directly inside the folder are
    /// listed. Unknown folders yield an empty list.
    pub fn list_files(&self, folder: &str) -> Vec<String> {
        if !self.contains_folder(folder) {
            return Vec::new();
        }

        self.files
            .entry(folder.to_string())
            .or_insert_with(|| scan_files(&self.root.join(folder)).into())
            .value()
            .to_vec()
    }

    /// Whether `file_name` (with extension) exists in `folder`.
    pub fn has_file(&self, folder: &str, file_name: &str) -> bool {
        self.list_files(folder).iter().any(|f| f == file_name)
    }

    /// Descriptive record of an agency, read from its `agency.txt`.
    ///
    /// The file is read at most once per folder; the outcome, including
    /// absence, is cached. A missing, empty or undecodable file yields `None`.
    pub fn load_agency_record(&self, folder: &str) -> Option<Arc<AgencyRecord>> {
        if !self.contains_folder(folder) {
            return None;
        }

        self.agencies
            .entry(folder.to_string())
            .or_insert_with(|| self.read_agency_record(folder))
            .value()
            .clone()
    }

    /// Read up to `limit` rows of `file_name` in `folder`.
    ///
    /// `file_name` must carry its extension. Unknown folders or files yield
    /// an empty list. A read failure part way through is logged and the rows
    /// read before it are returned. Nothing is cached.
    pub fn read_records(&self, folder: &str, file_name: &str, limit: usize) -> Vec<Record> {
        if !self.has_file(folder, file_name) {
            debug!("No file {} for agency {}", file_name, folder);
            return Vec::new();
        }

        let path = self.root.join(folder).join(file_name);
        let mut rows = Vec::new();
        if let Err(e) = read_rows(&path, limit, &mut rows) {
            warn!(
                "Error reading {} for {} after {} rows: {}",
                file_name,
                folder,
                rows.len(),
                e
            );
        }
        rows
    }

    fn read_agency_record(&self, folder: &str) -> Option<Arc<AgencyRecord>> {
        let path = self.root.join(folder).join(AGENCY_FILE);
        if !path.is_file() {
            debug!("Agency {} has no {}", folder, AGENCY_FILE);
            return None;
        }

        match read_first_row(&path) {
            Ok(fields) => Some(Arc::new(AgencyRecord::new(folder, fields))),
            Err(e) => {
                warn!("Error loading {}: {}", folder, e);
                None
            }
        }
    }
}

fn scan_folders(root: &Path) -> Vec<String> {
    if !root.is_dir() {
        warn!("Dataset root {} does not exist", root.display());
        return Vec::new();
    }

    let folders: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();

    debug!("Found {} agency folders under {}", folders.len(), root.display());
    folders
}

fn scan_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.ends_with(FILE_EXTENSION))
        .collect();

    files.sort();
    files
}

fn read_first_row(path: &Path) -> Result<Record> {
    let mut rows = Vec::with_capacity(1);
    read_rows(path, 1, &mut rows)?;
    rows.pop()
        .ok_or_else(|| CatalogError::EmptyDescriptor(path.to_path_buf()))
}

/// Append up to `limit` rows of `path` to `out`.
///
/// Rows are pushed as they are read, so `out` keeps everything read before a
/// failure. Rows past `limit` are never pulled from the reader. Ragged rows
/// are accepted: a short row lacks the trailing columns, cells past the
/// header are dropped.
fn read_rows(path: &Path, limit: usize, out: &mut Vec<Record>) -> Result<()> {
    let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    // GTFS exports often start with a UTF-8 byte order mark.
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CatalogError::csv(path, e))?
        .iter()
        .map(|column| column.trim_start_matches('\u{feff}').to_string())
        .collect();

    for row in reader.records().take(limit) {
        let row = row.map_err(|e| CatalogError::csv(path, e))?;
        out.push(
            headers
                .iter()
                .zip(row.iter())
                .map(|(column, value)| (column.clone(), value.to_string()))
                .collect(),
        );
    }

    Ok(())
}
