// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the index and the ranker.
//!
//! These are `debug_assert!` checks: zero-cost in release builds, loud in
//! tests and debug builds. The builder already returns errors for the
//! failures it can produce; these catch the ones it shouldn't be able to.
//!
//! | Contract                  | Property                                        |
//! |---------------------------|-------------------------------------------------|
//! | `check_ids_unique`        | ids are pairwise distinct within a collection   |
//! | `check_url_invariant`     | one url per model, `/resources/<brand>/<model>/`|
//! | `check_hits_sorted`       | scores are non-increasing                       |
//! | `check_hits_positive`     | no zero-score hit survives ranking              |

use std::collections::{HashMap, HashSet};

use crate::scoring::{
    ANYWHERE_SCORE, BRAND_SCORE, CATEGORY_SCORE, DESCRIPTION_SCORE, KEYWORDS_SCORE, MODEL_SCORE,
    PRIMARY_SCORE, SECONDARY_SCORE,
};
use crate::types::{SearchHit, SearchIndex};

// ============================================================================
// COMPILE-TIME ASSERTIONS
// ============================================================================

// Tier scores strictly decrease, so "first match wins" always keeps the best.
const _: () = {
    assert!(MODEL_SCORE > PRIMARY_SCORE);
    assert!(PRIMARY_SCORE > SECONDARY_SCORE);
    assert!(SECONDARY_SCORE > KEYWORDS_SCORE);
    assert!(KEYWORDS_SCORE > CATEGORY_SCORE);
    assert!(CATEGORY_SCORE > DESCRIPTION_SCORE);
    assert!(DESCRIPTION_SCORE > BRAND_SCORE);
    assert!(BRAND_SCORE > ANYWHERE_SCORE);
    assert!(ANYWHERE_SCORE > 0.0);
};

// ============================================================================
// INDEX CONTRACTS
// ============================================================================

fn assert_unique<'a>(collection: &str, ids: impl Iterator<Item = &'a str>) {
    let mut seen = HashSet::new();
    for id in ids {
        debug_assert!(
            seen.insert(id),
            "Contract violation: duplicate id '{}' in {}",
            id,
            collection
        );
    }
}

/// Check that every collection has pairwise distinct ids.
#[inline]
pub fn check_ids_unique(index: &SearchIndex) {
    if !cfg!(debug_assertions) {
        return;
    }
    assert_unique("issues", index.issues.iter().map(|r| r.id.as_str()));
    assert_unique("torqueSpecs", index.torque_specs.iter().map(|r| r.id.as_str()));
    assert_unique("guides", index.guides.iter().map(|r| r.id.as_str()));
    assert_unique("suppliers", index.suppliers.iter().map(|r| r.id.as_str()));
}

/// Check that all records of a model share one correctly shaped url.
#[inline]
pub fn check_url_invariant(index: &SearchIndex) {
    if !cfg!(debug_assertions) {
        return;
    }
    let identities = index
        .issues
        .iter()
        .map(|r| (&r.brand, &r.model, &r.url))
        .chain(index.torque_specs.iter().map(|r| (&r.brand, &r.model, &r.url)))
        .chain(index.guides.iter().map(|r| (&r.brand, &r.model, &r.url)))
        .chain(index.suppliers.iter().map(|r| (&r.brand, &r.model, &r.url)));

    let mut by_model: HashMap<&str, &str> = HashMap::new();
    for (brand, model, url) in identities {
        let expected = format!(
            "/resources/{}/{}/",
            brand.to_lowercase(),
            model.to_lowercase()
        );
        debug_assert_eq!(
            url, &expected,
            "Contract violation: url for model {} is not {}",
            model, expected
        );
        let first = by_model.entry(model.as_str()).or_insert(url.as_str());
        debug_assert_eq!(
            *first,
            url.as_str(),
            "Contract violation: model {} has more than one url",
            model
        );
    }
}

// ============================================================================
// RANKING CONTRACTS
// ============================================================================

/// Check that hits are sorted by descending score.
#[inline]
pub fn check_hits_sorted(hits: &[SearchHit]) {
    debug_assert!(
        hits.windows(2).all(|w| w[0].score >= w[1].score),
        "Contract violation: hits not sorted by descending score"
    );
}

/// Check that every hit has a positive score.
#[inline]
pub fn check_hits_positive(hits: &[SearchHit]) {
    debug_assert!(
        hits.iter().all(|h| h.score > 0.0),
        "Contract violation: zero-score hit in results"
    );
}
