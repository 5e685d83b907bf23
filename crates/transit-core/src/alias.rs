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

//! Fuzzy agency identifiers.
//!
//! Every agency is reachable through up to three lowercase keys:
//!
//! 1. its folder name
//! 2. an acronym of its display name (`"Societe de Transport de Montreal"` →
//!    `"stm"`), built from the first letter of each word longer than two
//!    characters, kept only when at least two letters long
//! 3. its full display name
//!
//! Keys are registered folder by folder in catalog enumeration order and the
//! first registration of a key wins. Collisions are not reported.

use crate::catalog::Catalog;
use std::collections::HashMap;
use tracing::debug;

/// Lowercase alias → canonical folder map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasIndex {
    aliases: HashMap<String, String>,
}

impl AliasIndex {
    /// Build the index from every folder of `catalog`.
    ///
    /// Loads each agency record through the catalog cache. Building twice
    /// over the same catalog yields an equal index.
    pub fn build(catalog: &Catalog) -> Self {
        let mut index = Self::default();

        for folder in catalog.list_agency_folders() {
            index.register(folder.to_lowercase(), folder);

            let Some(agency) = catalog.load_agency_record(folder) else {
                continue;
            };

            let name = agency.name().to_lowercase();
            if let Some(acronym) = derive_acronym(&name) {
                index.register(acronym, folder);
            }
            if !name.is_empty() {
                index.register(name, folder);
            }
        }

        debug!(
            "Alias index: {} keys for {} agencies",
            index.len(),
            catalog.list_agency_folders().len()
        );
        index
    }

    fn register(&mut self, key: String, folder: &str) {
        self.aliases
            .entry(key)
            .or_insert_with(|| folder.to_string());
    }

    /// Folder bound to `identifier`, compared case-insensitively.
    pub fn lookup(&self, identifier: &str) -> Option<&str> {
        self.aliases
            .get(&identifier.to_lowercase())
            .map(String::as_str)
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether no key is registered.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Acronym of a display name, if it yields one.
///
/// The name is lowercased, `_` and `-` become spaces, and the first letter of
/// every word longer than two characters is kept. Single-word names and
/// acronyms shorter than two letters yield `None`.
///
/// # Examples
///
/// ```
/// use transit_core::derive_acronym;
///
/// assert_eq!(derive_acronym("Societe de Transport de Montreal").as_deref(), Some("stm"));
/// assert_eq!(derive_acronym("Toronto Transit Commission").as_deref(), Some("ttc"));
/// assert_eq!(derive_acronym("Translink"), None);
/// ```
pub fn derive_acronym(name: &str) -> Option<String> {
    let normalized = name.to_lowercase().replace(['_', '-'], " ");
    let words: Vec<&str> = normalized.split_whitespace().collect();
    if words.len() < 2 {
        return None;
    }

    let acronym: String = words
        .iter()
        .filter(|word| word.chars().count() > 2)
        .filter_map(|word| word.chars().next())
        .collect();

    (acronym.chars().count() >= 2).then_some(acronym)
}
