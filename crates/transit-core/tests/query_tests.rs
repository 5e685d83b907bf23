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

//! Integration tests for dataset description, search and bounded queries.

mod common;

use common::Dataset;
use transit_core::QueryEngine;

#[test]
fn test_missing_root_degrades_to_empty() {
    let dataset = Dataset::new();
    let engine = QueryEngine::open(dataset.root().join("gtfs"));

    assert!(engine.catalog().list_agency_folders().is_empty());
    assert!(engine.search_agencies(None).is_empty());
    assert!(engine.list_agency_files("ttc").is_empty());
    assert!(engine.query_file("ttc", "stops", 10).is_empty());

    let summary = engine.describe_dataset();
    assert_eq!(summary.total_agencies, 0);
    assert_eq!(summary.total_file_types, 0);
    assert!(summary.all_available_files.is_empty());
    assert_eq!(summary.core_files.len(), 5);
}

#[test]
fn test_list_agency_files_sorted() {
    let dataset = Dataset::new()
        .file("ttc", "stops.txt", "stop_id\n1\n")
        .file("ttc", "routes.txt", "route_id\n1\n");
    let engine = QueryEngine::open(dataset.root());

    assert_eq!(engine.list_agency_files("ttc"), vec!["routes.txt", "stops.txt"]);
}

#[test]
fn test_describe_unions_files_across_agencies() {
    let dataset = Dataset::new()
        .agency("ttc", "Toronto Transit Commission")
        .stops("ttc", 1)
        .agency("grt", "Grand River Transit")
        .file("grt", "fare_rules.txt", "fare_id\n")
        .bare_folder("empty");
    let engine = QueryEngine::open(dataset.root());

    let summary = engine.describe_dataset();
    assert_eq!(summary.total_agencies, 3);
    assert_eq!(
        summary.all_available_files,
        vec!["agency.txt", "fare_rules.txt", "stops.txt"]
    );
}

#[test]
fn test_search_excludes_missing_and_corrupt_records() {
    let dataset = Dataset::new()
        .agency("ttc", "Toronto Transit Commission")
        .bare_folder("no_record")
        .file("corrupt", "agency.txt", "agency_name\n")
        .file("not_utf8", "agency.txt", b"agency_name\nMontr\xe9al\n");
    let engine = QueryEngine::open(dataset.root());

    let all = engine.search_agencies(None);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].agency.folder_name(), "ttc");
    assert_eq!(all[0].available_files, 1);
}

#[test]
fn test_search_matches_url_fragment() {
    let dataset = Dataset::new()
        .agency("ttc", "Toronto Transit Commission")
        .agency("grt", "Grand River Transit");
    let engine = QueryEngine::open(dataset.root());

    let hits = engine.search_agencies(Some("GRT.EXAMPLE"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].agency.name(), "Grand River Transit");
    assert_eq!(hits[0].agency.phone(), "555-0100");
}

#[test]
fn test_query_values_stay_text() {
    let dataset = Dataset::new().file(
        "ttc",
        "stops.txt",
        "stop_id,stop_lat,wheelchair_boarding,stop_desc\n0042,43.6453,1,\n",
    );
    let engine = QueryEngine::open(dataset.root());

    let rows = engine.query_file("ttc", "stops", 10);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["stop_id"], "0042");
    assert_eq!(rows[0]["stop_lat"], "43.6453");
    assert_eq!(rows[0]["stop_desc"], "");
}

#[test]
fn test_query_handles_quoted_fields() {
    let dataset = Dataset::new().file(
        "ttc",
        "routes.txt",
        "route_id,route_long_name\n501,\"Queen, Long Branch\"\n",
    );
    let engine = QueryEngine::open(dataset.root());

    let rows = engine.query_file("ttc", "routes", 10);
    assert_eq!(rows[0]["route_long_name"], "Queen, Long Branch");
}

#[test]
fn test_query_keeps_ragged_rows() {
    let dataset = Dataset::new().file(
        "ttc",
        "stops.txt",
        "stop_id,stop_name,zone_id\n1,Union,A\n2,King\n3,Queen,B\n",
    );
    let engine = QueryEngine::open(dataset.root());

    let rows = engine.query_file("ttc", "stops", 10);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["stop_name"], "King");
    assert!(!rows[1].contains_key("zone_id"));
    assert_eq!(rows[2]["zone_id"], "B");
}

#[test]
fn test_short_agency_row_stays_searchable() {
    let dataset = Dataset::new().file(
        "short",
        "agency.txt",
        "agency_id,agency_name,agency_url,agency_phone\n1,Short Row Transit,http://x\n",
    );
    let engine = QueryEngine::open(dataset.root());

    assert_eq!(engine.search_agencies(None).len(), 1);
    assert_eq!(engine.resolve("srt"), Some("short"));
}

#[test]
fn test_query_truncates_at_undecodable_row() {
    let dataset = Dataset::new().file(
        "ttc",
        "stops.txt",
        b"stop_id,stop_name\n1,Union\n2,King\n3,Qu\xe9en\n4,Dundas\n",
    );
    let engine = QueryEngine::open(dataset.root());

    let rows = engine.query_file("ttc", "stops", 100);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["stop_name"], "King");

    // The bad row is never reached under a tighter limit.
    assert_eq!(engine.query_file("ttc", "stops", 2).len(), 2);
}

#[test]
fn test_query_truncates_at_invalid_utf8() {
    let dataset = Dataset::new().stops("ttc", 2);
    let path = dataset.root().join("ttc").join("stops.txt");
    let mut bytes = std::fs::read(&path).unwrap();
    bytes.extend_from_slice(b"9,\xff\xfe\n");
    std::fs::write(&path, bytes).unwrap();

    let engine = QueryEngine::open(dataset.root());
    assert_eq!(engine.query_file("ttc", "stops", 100).len(), 2);
}

#[test]
fn test_query_rereads_file_each_call() {
    let dataset = Dataset::new().stops("ttc", 2);
    let engine = QueryEngine::open(dataset.root());
    assert_eq!(engine.query_file("ttc", "stops", 10).len(), 2);

    let dataset = dataset.stops("ttc", 4);
    assert_eq!(engine.query_file("ttc", "stops", 10).len(), 4);
    drop(dataset);
}

#[test]
fn test_query_unknown_agency_or_file_is_empty() {
    let dataset = Dataset::new()
        .agency("ttc", "Toronto Transit Commission")
        .stops("ttc", 3);
    let engine = QueryEngine::open(dataset.root());

    assert!(engine.query_file("winnipeg", "stops", 10).is_empty());
    assert!(engine.query_file("ttc", "shapes", 10).is_empty());
    assert!(engine.query_file("ttc", "../ttc/stops", 10).is_empty());
}

#[test]
fn test_query_loose_identifier() {
    let dataset = Dataset::new()
        .agency("ttc", "Toronto Transit Commission")
        .stops("ttc", 3);
    let engine = QueryEngine::open(dataset.root());

    assert_eq!(engine.resolve("Toronto"), None);
    assert_eq!(engine.query_file("Toronto", "stops.txt", 10).len(), 3);
}
