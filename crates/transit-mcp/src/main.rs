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

//! Transit MCP Server binary.
//!
//! Serves the Canadian Public Transit Network Database to MCP clients over
//! stdio.
//!
//! # Usage
//!
//! ```bash
//! # Run against the default container dataset location
//! transit-mcp
//!
//! # Run against a local copy of the GTFS directory
//! transit-mcp --data-dir ./gtfs
//!
//! # Run with debug logging
//! RUST_LOG=debug transit-mcp
//! ```
//!
//! # Available Tools
//!
//! - `describe_dataset`: Dataset overview and every file type present
//! - `list_agencies`: List or search agencies
//! - `get_agency_files`: Files available for one agency
//! - `query_data`: Bounded records from any file of an agency

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use transit_mcp::{McpServer, McpServerConfig, QueryLimits, DEFAULT_DATA_DIR};

#[derive(Parser)]
#[command(name = "transit-mcp")]
#[command(author = "Dweve B.V.")]
#[command(version)]
#[command(about = "Canadian Public Transit Network Database MCP Server for AI/LLM integration")]
struct Cli {
    /// Dataset root containing one directory per agency
    #[arg(short, long, env = "TRANSIT_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Use the blocking stdio loop instead of the Tokio runtime
    #[arg(long)]
    sync: bool,

    /// Request burst size (0 disables rate limiting)
    #[arg(long, default_value_t = 200)]
    rate_limit_burst: usize,

    /// Sustained requests per second
    #[arg(long, default_value_t = 100)]
    rate_limit_per_second: usize,

    /// Records returned by query_data when no limit is given
    #[arg(long, default_value_t = 5_000, value_parser = clap::value_parser!(u32).range(1..))]
    default_limit: u32,

    /// Upper bound on any query_data limit
    #[arg(long, default_value_t = 100_000, value_parser = clap::value_parser!(u32).range(1..))]
    max_limit: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("transit_mcp=info".parse()?)
                .add_directive("transit_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = McpServerConfig {
        data_dir: cli.data_dir.canonicalize().unwrap_or(cli.data_dir),
        rate_limit_burst: cli.rate_limit_burst,
        rate_limit_per_second: cli.rate_limit_per_second,
        limits: QueryLimits {
            default_limit: cli.default_limit as usize,
            max_limit: cli.max_limit as usize,
        },
        ..Default::default()
    };

    let mut server = McpServer::new(config);
    server.warm_up();

    if cli.sync {
        server.run_stdio()?;
    } else {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(async { server.run_stdio_async().await })?;
    }

    info!("Server stopped");
    Ok(())
}
