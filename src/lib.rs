//! Search index builder and ranking engine for a vehicle restoration
//! knowledge base.
//!
//! Build time flattens per-vehicle JSON records (known issues, torque specs,
//! guides, suppliers) into one static index artifact. Run time loads that
//! artifact once and answers free-text queries with a tiered, weighted
//! substring score.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  vehicles/   │────▶│   build/     │────▶│ search-index │
//! │   *.json     │     │ (flatten,    │     │    .json     │
//! └──────────────┘     │  keywords)   │     └──────┬───────┘
//!                      └──────────────┘            │ load
//!                                                  ▼
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   render     │◀────│   search/    │◀────│   engine     │
//! │ (html cards) │     │ (tokenize,   │     │ (shared idx, │
//! └──────────────┘     │  filter)     │     │  sessions)   │
//!                      └──────┬───────┘     └──────────────┘
//!                             ▼
//!                      ┌──────────────┐
//!                      │  scoring/    │
//!                      │ (tiers, rank)│
//!                      └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use resto_search::{build_index, search, SearchFilters};
//! use resto_search::testing::e30_rust_vehicle;
//!
//! let index = build_index(&[e30_rust_vehicle()]).unwrap();
//! let hits = search(&index, "e30", &SearchFilters::all());
//! assert_eq!(hits[0].record.id(), "e30-rust-1");
//! assert_eq!(hits[0].score, 15.0);
//! ```

pub mod build;
pub mod contracts;
pub mod engine;
pub mod error;
pub mod render;
pub mod scoring;
pub mod search;
pub mod testing;
pub mod types;
pub mod utils;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use build::{build_index, run_build, BuildConfig, BuildSummary, SiteStats, VehicleRecord};
pub use engine::{EngineStatus, SearchEngine, SearchSession};
pub use error::{BuildError, LoadError, SearchError};
pub use render::{render_results_html, results_summary, truncate_text, ResultCard};
pub use scoring::{score_record, Tier};
pub use search::{highlight, search, tokenize_query, SearchFilters};
pub use types::{
    GuideKind, GuideRecord, IndexedRecord, IssueRecord, RecordType, SearchHit, SearchIndex,
    SupplierRecord, TorqueSpecRecord,
};
pub use utils::normalize;
