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

//! Error types for catalog reads.
//!
//! These never cross the public query API: every failure is logged and
//! turned into an empty or absent result where it happens. They exist so the
//! internal readers can use `?` and so the log line carries the offending path.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading a file from the dataset root.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The file or directory could not be opened or listed.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file could not be decoded as delimited text (bad UTF-8, ...).
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },

    /// The descriptive file has a header but no data row.
    #[error("no agency row in {0}")]
    EmptyDescriptor(PathBuf),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for catalog reads.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_path() {
        let err = CatalogError::io(
            "/data/ttc/agency.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/data/ttc/agency.txt"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_empty_descriptor_display() {
        let err = CatalogError::EmptyDescriptor(PathBuf::from("ttc/agency.txt"));
        assert_eq!(err.to_string(), "no agency row in ttc/agency.txt");
    }
}
