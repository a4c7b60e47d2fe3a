// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! Each query term lands in exactly one tier per record, the best one it
//! matches. Which field backs which tier depends on the record type, and that
//! mapping lives in a table ([`fields`]) rather than in the scoring loop.

mod core;
pub mod fields;
pub mod ranking;

pub use core::*;
pub use fields::{Field, FieldMap, Searchable};
