// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search results get sorted.
//!
//! Score is the only key. Equal scores keep collection order (issues, torque
//! specs, guides, suppliers, then source order within each), which is what a
//! stable sort on the scoring pass output gives for free.

use std::cmp::Ordering;

use crate::contracts::{check_hits_positive, check_hits_sorted};
use crate::types::SearchHit;

/// Compare two hits for ranking: higher score first.
pub fn compare_hits(a: &SearchHit, b: &SearchHit) -> Ordering {
    b.score.total_cmp(&a.score)
}

/// Drop zero-score hits and sort the rest, stable on ties.
pub fn rank(mut hits: Vec<SearchHit>) -> Vec<SearchHit> {
    hits.retain(|hit| hit.score > 0.0);
    hits.sort_by(compare_hits);

    check_hits_positive(&hits);
    check_hits_sorted(&hits);
    hits
}
