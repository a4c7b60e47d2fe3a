// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the resto-search command-line interface.
//!
//! Four subcommands: `index` builds the artifact from vehicle files, `search`
//! queries it from the terminal, `inspect` summarizes one, and `stats` prints
//! the home page counters.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use resto_search::build::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_PATH};

#[derive(Parser)]
#[command(
    name = "resto-search",
    about = "Search index builder and query tool for the vehicle restoration knowledge base",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the search index from a directory of vehicle JSON files
    Index {
        /// Directory of vehicle records
        #[arg(short, long, env = "RESTO_SEARCH_INPUT", default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,

        /// Where to write the index artifact
        #[arg(short, long, env = "RESTO_SEARCH_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,

        /// Write single-line JSON instead of two-space indented
        #[arg(long)]
        compact: bool,

        /// Hide progress bars
        #[arg(short, long)]
        quiet: bool,
    },

    /// Search an index artifact and display ranked results
    Search {
        /// Path to the index artifact
        file: PathBuf,

        /// Search query
        query: String,

        /// Only show results for this brand (exact, e.g. "BMW")
        #[arg(short, long, default_value = "all")]
        brand: String,

        /// Only show one record type: issue, torque, guide, supplier
        #[arg(short = 't', long = "type", default_value = "all")]
        record_type: String,

        /// Maximum number of results to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Show which tier each query term matched
        #[arg(long)]
        explain: bool,
    },

    /// Summarize an index artifact: counts, brands, models
    Inspect {
        /// Path to the index artifact
        file: PathBuf,
    },

    /// Print site statistics for a directory of vehicle files
    Stats {
        /// Directory of vehicle records
        #[arg(short, long, env = "RESTO_SEARCH_INPUT", default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
