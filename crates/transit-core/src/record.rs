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

//! Row types produced by the catalog.

use crate::{AGENCY_NAME_FIELD, AGENCY_PHONE_FIELD, AGENCY_URL_FIELD, FOLDER_NAME_FIELD};
use indexmap::IndexMap;
use serde::Serialize;

/// One row of a data file: column name to raw text value, in header order.
///
/// Values are never coerced; an empty cell stays an empty string.
pub type Record = IndexMap<String, String>;

/// The descriptive row of an agency, read from its `agency.txt`.
///
/// Carries every column of the source row plus `folder_name`, the canonical
/// identifier of the agency. Serializes as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AgencyRecord {
    fields: Record,
}

impl AgencyRecord {
    /// Build a record from a source row, injecting `folder_name`.
    ///
    /// A `folder_name` column in the source row is overwritten.
    pub fn new(folder: &str, mut fields: Record) -> Self {
        fields.insert(FOLDER_NAME_FIELD.to_string(), folder.to_string());
        Self { fields }
    }

    /// Canonical folder of the agency.
    pub fn folder_name(&self) -> &str {
        self.get(FOLDER_NAME_FIELD).unwrap_or_default()
    }

    /// Display name (`agency_name`), empty when the column is missing.
    pub fn name(&self) -> &str {
        self.get(AGENCY_NAME_FIELD).unwrap_or_default()
    }

    /// Contact URL (`agency_url`), empty when the column is missing.
    pub fn url(&self) -> &str {
        self.get(AGENCY_URL_FIELD).unwrap_or_default()
    }

    /// Phone (`agency_phone`), empty when the column is missing.
    pub fn phone(&self) -> &str {
        self.get(AGENCY_PHONE_FIELD).unwrap_or_default()
    }

    /// Value of an arbitrary column.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// All columns, including `folder_name`.
    pub fn fields(&self) -> &Record {
        &self.fields
    }
}
