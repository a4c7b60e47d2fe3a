// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Keyword blobs: the fallback match surface for each record.
//!
//! Every indexed record gets a `keywords` string that the scorer checks after
//! the primary and secondary fields. Issues carry long free-text descriptions,
//! so their keywords are filtered down to a short, deduplicated bag of words.
//! The other types are short already and just concatenate their fields plus a
//! few fixed terms ("torque spec ft-lbs", "parts supplier") that users type
//! but the data never says.
//!
//! One function does both; [`KeywordOptions`] carries the difference.

use crate::types::{GuideKind, RecordType};
use crate::utils::fold_diacritics;

/// Most keywords an issue record keeps.
pub const ISSUE_MAX_KEYWORDS: usize = 20;

/// Tokens this many chars or shorter are dropped from issue keywords.
pub const ISSUE_MIN_TOKEN_EXCLUSIVE: usize = 2;

/// How [`build_keywords`] turns fields into a keyword string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeywordOptions {
    /// Fold diacritics and replace anything outside `[a-z0-9\s]` with a space.
    pub strip_punctuation: bool,
    /// Drop tokens with this many chars or fewer.
    pub min_len_exclusive: usize,
    /// Keep only the first occurrence of each token.
    pub dedupe: bool,
    /// Cap on the number of tokens kept.
    pub max_tokens: Option<usize>,
}

impl KeywordOptions {
    /// Lowercase and collapse whitespace. Nothing dropped.
    pub const PLAIN: KeywordOptions = KeywordOptions {
        strip_punctuation: false,
        min_len_exclusive: 0,
        dedupe: false,
        max_tokens: None,
    };

    /// Filtered bag of words for long free text.
    pub const FILTERED: KeywordOptions = KeywordOptions {
        strip_punctuation: true,
        min_len_exclusive: ISSUE_MIN_TOKEN_EXCLUSIVE,
        dedupe: true,
        max_tokens: Some(ISSUE_MAX_KEYWORDS),
    };

    /// Canonical options per collection.
    pub fn for_type(record_type: RecordType) -> KeywordOptions {
        match record_type {
            RecordType::Issue => KeywordOptions::FILTERED,
            RecordType::Torque | RecordType::Guide | RecordType::Supplier => KeywordOptions::PLAIN,
        }
    }
}

/// Build a keyword string from `fields`.
///
/// Fields are joined with spaces, lowercased, optionally stripped of
/// punctuation, split on whitespace, filtered by length, optionally
/// deduplicated (first occurrence wins), capped, and re-joined with single
/// spaces.
pub fn build_keywords(fields: &[&str], options: KeywordOptions) -> String {
    let joined = fields.join(" ").to_lowercase();

    let text = if options.strip_punctuation {
        fold_diacritics(&joined)
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect::<String>()
    } else {
        joined
    };

    let mut kept: Vec<&str> = Vec::new();
    for token in text.split_whitespace() {
        if token.chars().count() <= options.min_len_exclusive {
            continue;
        }
        if options.dedupe && kept.contains(&token) {
            continue;
        }
        if options.max_tokens.is_some_and(|max| kept.len() >= max) {
            break;
        }
        kept.push(token);
    }

    kept.join(" ")
}

pub fn issue_keywords(title: &str, symptoms: &str, description: &str) -> String {
    build_keywords(
        &[title, symptoms, description],
        KeywordOptions::for_type(RecordType::Issue),
    )
}

pub fn torque_keywords(component: &str, category: &str, notes: &str) -> String {
    build_keywords(
        &[component, category, "torque spec ft-lbs", notes],
        KeywordOptions::for_type(RecordType::Torque),
    )
}

pub fn guide_keywords(title: &str, description: &str, difficulty: &str, kind: GuideKind) -> String {
    build_keywords(
        &[title, description, difficulty, kind.as_str()],
        KeywordOptions::for_type(RecordType::Guide),
    )
}

pub fn supplier_keywords(name: &str, category: &str, notes: &str) -> String {
    build_keywords(
        &[name, category, notes, "parts supplier"],
        KeywordOptions::for_type(RecordType::Supplier),
    )
}
