// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tier constants and the per-record scorer.
//!
//! A term is tested against the tiers in priority order and earns the score
//! of the first one it matches. Tiers don't accumulate: a term found in both
//! the title and the keywords is worth a title match, once. A record where
//! every term matched something gets its total multiplied by
//! [`FULL_COVERAGE_BONUS`].

use super::fields::{Field, Searchable};

// =============================================================================
// TIER SCORES
// =============================================================================

/// Exact model code, or a substring of the model name.
pub const MODEL_SCORE: f64 = 10.0;

/// Title-like field: issue/guide title, torque component, supplier name.
pub const PRIMARY_SCORE: f64 = 8.0;

/// Issue symptoms, torque spec value.
pub const SECONDARY_SCORE: f64 = 6.0;

pub const KEYWORDS_SCORE: f64 = 5.0;

/// Torque category. No other type has this tier.
pub const CATEGORY_SCORE: f64 = 4.0;

/// Issue/guide description, torque/supplier notes.
pub const DESCRIPTION_SCORE: f64 = 3.0;

pub const BRAND_SCORE: f64 = 2.0;

/// Anywhere in the record's searchable text.
pub const ANYWHERE_SCORE: f64 = 1.0;

/// Multiplier when every query term matched at least one tier.
pub const FULL_COVERAGE_BONUS: f64 = 1.5;

/// Scoring tier, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Model,
    Primary,
    Secondary,
    Keywords,
    Category,
    Description,
    Brand,
    Anywhere,
}

impl Tier {
    /// Every tier, highest priority first.
    pub const ALL: [Tier; 8] = [
        Tier::Model,
        Tier::Primary,
        Tier::Secondary,
        Tier::Keywords,
        Tier::Category,
        Tier::Description,
        Tier::Brand,
        Tier::Anywhere,
    ];

    pub const fn score(self) -> f64 {
        match self {
            Tier::Model => MODEL_SCORE,
            Tier::Primary => PRIMARY_SCORE,
            Tier::Secondary => SECONDARY_SCORE,
            Tier::Keywords => KEYWORDS_SCORE,
            Tier::Category => CATEGORY_SCORE,
            Tier::Description => DESCRIPTION_SCORE,
            Tier::Brand => BRAND_SCORE,
            Tier::Anywhere => ANYWHERE_SCORE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Model => "model",
            Tier::Primary => "primary",
            Tier::Secondary => "secondary",
            Tier::Keywords => "keywords",
            Tier::Category => "category",
            Tier::Description => "description",
            Tier::Brand => "brand",
            Tier::Anywhere => "anywhere",
        }
    }
}

// =============================================================================
// LOWERCASED VIEW
// =============================================================================

/// A record's tier fields, lowercased once so each term is a plain substring
/// test.
#[derive(Clone, Debug)]
pub struct LoweredFields {
    model: String,
    model_name: String,
    primary: String,
    secondary: Option<String>,
    keywords: String,
    category: Option<String>,
    description: Option<String>,
    brand: String,
    haystack: String,
}

impl LoweredFields {
    pub fn of<R: Searchable + ?Sized>(record: &R) -> Self {
        let map = record.record_type().field_map();
        let get = |field: Field| record.field(field).unwrap_or("").to_lowercase();
        let get_opt = |field: Option<Field>| field.map(get);

        let haystack = map
            .searchable
            .iter()
            .map(|f| record.field(*f).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        Self {
            model: get(Field::Model),
            model_name: get(Field::ModelName),
            primary: get(map.primary),
            secondary: get_opt(map.secondary),
            keywords: get(Field::Keywords),
            category: get_opt(map.category),
            description: get_opt(map.description),
            brand: get(Field::Brand),
            haystack,
        }
    }

    /// Best tier `term` matches, or `None`. `term` must already be lowercase.
    pub fn tier_for(&self, term: &str) -> Option<Tier> {
        let contains = |field: &Option<String>| field.as_deref().is_some_and(|f| f.contains(term));

        if self.model == term || self.model_name.contains(term) {
            Some(Tier::Model)
        } else if self.primary.contains(term) {
            Some(Tier::Primary)
        } else if contains(&self.secondary) {
            Some(Tier::Secondary)
        } else if self.keywords.contains(term) {
            Some(Tier::Keywords)
        } else if contains(&self.category) {
            Some(Tier::Category)
        } else if contains(&self.description) {
            Some(Tier::Description)
        } else if self.brand.contains(term) {
            Some(Tier::Brand)
        } else if self.haystack.contains(term) {
            Some(Tier::Anywhere)
        } else {
            None
        }
    }
}

// =============================================================================
// SCORING
// =============================================================================

/// Per-term breakdown of a record's score.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreBreakdown {
    /// Matched tier per query term, in query order.
    pub tiers: Vec<Option<Tier>>,
    pub base: f64,
    pub bonus_applied: bool,
}

impl ScoreBreakdown {
    pub fn matched_terms(&self) -> usize {
        self.tiers.iter().filter(|t| t.is_some()).count()
    }

    pub fn total(&self) -> f64 {
        if self.bonus_applied {
            self.base * FULL_COVERAGE_BONUS
        } else {
            self.base
        }
    }
}

/// Score `record` against lowercased query `terms`, keeping the per-term tiers.
pub fn explain_record<R, S>(record: &R, terms: &[S]) -> ScoreBreakdown
where
    R: Searchable + ?Sized,
    S: AsRef<str>,
{
    let lowered = LoweredFields::of(record);
    let tiers: Vec<Option<Tier>> = terms
        .iter()
        .map(|term| lowered.tier_for(term.as_ref()))
        .collect();

    let base = tiers.iter().flatten().map(|t| t.score()).sum();
    let matched = tiers.iter().filter(|t| t.is_some()).count();

    ScoreBreakdown {
        tiers,
        base,
        bonus_applied: !terms.is_empty() && matched == terms.len(),
    }
}

/// Score `record` against lowercased query `terms`. Zero means no term matched.
pub fn score_record<R, S>(record: &R, terms: &[S]) -> f64
where
    R: Searchable + ?Sized,
    S: AsRef<str>,
{
    explain_record(record, terms).total()
}
