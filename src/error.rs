// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for the build pipeline and the runtime engine.
//!
//! Build errors are fatal: the runtime assumes every `id` in a collection is
//! unique and every `url` is well-formed, so a half-built index is worse than
//! no index. Search errors are the opposite - the only one that matters is
//! "the index isn't here yet", which callers must be able to tell apart from
//! "nothing matched".

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading vehicle records or writing the index artifact.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A vehicle record lacks a field needed to derive ids and urls.
    #[error("vehicle record '{origin}' is missing required field `{field}`")]
    MissingField { origin: String, field: &'static str },

    /// Two vehicles share a model code (ignoring case) but disagree on brand,
    /// name, years or page.
    #[error("model '{model}' is described as both [{first}] and [{second}]")]
    ConflictingModel {
        model: String,
        first: String,
        second: String,
    },

    #[error("duplicate id '{id}' in {collection} collection")]
    DuplicateId { collection: &'static str, id: String },

    #[error("failed to serialize search index: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Failures while fetching or parsing a built index artifact.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read index {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed index artifact: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures surfaced by the query layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The index has not finished loading, or loading failed.
    #[error("search index unavailable: {reason}")]
    IndexUnavailable { reason: String },

    /// A type filter outside `issue`/`torque`/`guide`/`supplier`.
    #[error("unknown record type filter '{0}'")]
    UnknownRecordType(String),
}

impl SearchError {
    pub(crate) fn unavailable(reason: impl Into<String>) -> Self {
        Self::IndexUnavailable {
            reason: reason.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::IndexUnavailable { .. })
    }
}
