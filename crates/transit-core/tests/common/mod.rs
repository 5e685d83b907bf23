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

//! Shared fixtures: a temporary dataset root with agency folders.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Builder for a throwaway dataset root.
pub struct Dataset {
    dir: TempDir,
}

impl Dataset {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Add an agency folder with an `agency.txt` naming it.
    pub fn agency(self, folder: &str, name: &str) -> Self {
        self.file(
            folder,
            "agency.txt",
            &format!(
                "agency_id,agency_name,agency_url,agency_phone\n1,{},http://{}.example.ca,555-0100\n",
                name, folder
            ),
        )
    }

    /// Add an agency folder with no `agency.txt`.
    pub fn bare_folder(self, folder: &str) -> Self {
        fs::create_dir_all(self.root().join(folder)).unwrap();
        self
    }

    /// Write a file inside an agency folder.
    pub fn file(self, folder: &str, name: &str, content: impl AsRef<[u8]>) -> Self {
        let dir = self.root().join(folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
        self
    }

    /// Write `rows` numbered rows of `stop_id,stop_name`.
    pub fn stops(self, folder: &str, rows: usize) -> Self {
        let mut content = String::from("stop_id,stop_name\n");
        for i in 0..rows {
            content.push_str(&format!("{},Stop {}\n", i, i));
        }
        self.file(folder, "stops.txt", &content)
    }
}
