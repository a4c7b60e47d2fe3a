// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search: query in, ranked hits out.
//!
//! Every record in every collection is scored independently, zero scores are
//! dropped, the rest sorted by score. Facet filters (brand, type) are applied
//! to the ranked list. The index is never mutated, so the scoring pass can
//! fan out across threads.

pub mod highlight;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::SearchError;
use crate::scoring::ranking::rank;
use crate::scoring::{score_record, Searchable};
use crate::types::{IndexedRecord, RecordType, SearchHit, SearchIndex};

pub use highlight::*;

/// Facet value meaning "no filter".
pub const ALL_FILTER: &str = "all";

/// Split a query into lowercase terms, dropping single-character tokens.
///
/// "  E30 a Rust " → `["e30", "rust"]`
pub fn tokenize_query(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// Brand and type facet selections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Exact `brand` to keep. `None` keeps every brand.
    pub brand: Option<String>,
    pub record_type: Option<RecordType>,
}

fn facet(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value == ALL_FILTER {
        None
    } else {
        Some(value)
    }
}

impl SearchFilters {
    /// No filtering.
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse facet values as a UI sends them.
    ///
    /// `"all"` and `""` mean no filter on that facet. Unknown brands are
    /// accepted and simply match nothing; unknown types are rejected.
    pub fn parse(brand: &str, record_type: &str) -> Result<Self, SearchError> {
        Ok(Self {
            brand: facet(brand).map(str::to_string),
            record_type: facet(record_type)
                .map(str::parse::<RecordType>)
                .transpose()?,
        })
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_type(mut self, record_type: RecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.record_type.is_none()
    }

    pub fn matches(&self, hit: &SearchHit) -> bool {
        self.brand
            .as_deref()
            .map_or(true, |b| hit.record.brand() == b)
            && self.record_type.map_or(true, |t| hit.record_type == t)
    }
}

fn score_collection<R>(
    records: &[R],
    terms: &[String],
    wrap: fn(&R) -> IndexedRecord,
) -> Vec<SearchHit>
where
    R: Searchable + Sync,
{
    let score_one = |record: &R| {
        let score = score_record(record, terms);
        (score > 0.0).then(|| SearchHit {
            record: wrap(record),
            score,
            record_type: record.record_type(),
        })
    };

    #[cfg(feature = "parallel")]
    {
        records.par_iter().filter_map(score_one).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        records.iter().filter_map(score_one).collect()
    }
}

/// Score every record against `terms`, collections in [`RecordType::ALL`]
/// order. Unranked and unfiltered.
pub fn score_index(index: &SearchIndex, terms: &[String]) -> Vec<SearchHit> {
    let mut hits = score_collection(&index.issues, terms, |r| IndexedRecord::Issue(r.clone()));
    hits.extend(score_collection(&index.torque_specs, terms, |r| {
        IndexedRecord::Torque(r.clone())
    }));
    hits.extend(score_collection(&index.guides, terms, |r| {
        IndexedRecord::Guide(r.clone())
    }));
    hits.extend(score_collection(&index.suppliers, terms, |r| {
        IndexedRecord::Supplier(r.clone())
    }));
    hits
}

/// Ranked, filtered hits for `query`.
///
/// An empty or whitespace-only query, or one with no term longer than one
/// character, returns no hits.
pub fn search(index: &SearchIndex, query: &str, filters: &SearchFilters) -> Vec<SearchHit> {
    search_limited(index, query, filters, None)
}

/// [`search`], keeping at most `limit` hits after filtering.
pub fn search_limited(
    index: &SearchIndex,
    query: &str,
    filters: &SearchFilters,
    limit: Option<usize>,
) -> Vec<SearchHit> {
    let terms = tokenize_query(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut hits = rank(score_index(index, &terms));
    let scored = hits.len();
    if !filters.is_empty() {
        hits.retain(|hit| filters.matches(hit));
    }
    if let Some(limit) = limit {
        hits.truncate(limit);
    }

    tracing::debug!(
        terms = terms.len(),
        scored,
        returned = hits.len(),
        "search complete"
    );
    hits
}
