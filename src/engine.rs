// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The runtime engine: a shared, lazily loaded index plus per-caller sessions.
//!
//! The index is loaded once (or reloaded on demand) and then only read, so it
//! sits behind an `Arc` and every search clones the pointer, not the data.
//! Filter selections are not engine state. Each caller owns a
//! [`SearchSession`] with its own brand/type facets, so two users of one
//! engine never see each other's filters.
//!
//! ```text
//!             load ok                 reload ok
//!  Pending ───────────────▶ Ready ◀──────────────┐
//!     │                      │                   │
//!     │ load failed          │ reload failed     │
//!     ▼                      ▼ (keeps index)     │
//!  Failed ──────────────────────── retry ────────┘
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};

use parking_lot::RwLock;

use crate::error::{LoadError, SearchError};
use crate::search::{search_limited, tokenize_query, SearchFilters};
use crate::types::{SearchHit, SearchIndex};

#[derive(Clone, Debug)]
enum IndexState {
    Pending,
    Ready(Arc<SearchIndex>),
    Failed(String),
}

/// Observable engine state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineStatus {
    Pending,
    Ready { records: usize },
    Failed { reason: String },
}

/// Shared search engine. Cloning is cheap and clones share one index.
#[derive(Clone, Debug)]
pub struct SearchEngine {
    state: Arc<RwLock<IndexState>>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    /// An engine with no index yet. Searches fail with
    /// [`SearchError::IndexUnavailable`] until a load succeeds.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(IndexState::Pending)),
        }
    }

    /// An engine that is ready from the start.
    pub fn with_index(index: SearchIndex) -> Self {
        let engine = Self::new();
        engine.set_index(index);
        engine
    }

    pub fn status(&self) -> EngineStatus {
        match &*self.state.read() {
            IndexState::Pending => EngineStatus::Pending,
            IndexState::Ready(index) => EngineStatus::Ready {
                records: index.len(),
            },
            IndexState::Failed(reason) => EngineStatus::Failed {
                reason: reason.clone(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(&*self.state.read(), IndexState::Ready(_))
    }

    /// The loaded index, or why there isn't one.
    pub fn index(&self) -> Result<Arc<SearchIndex>, SearchError> {
        match &*self.state.read() {
            IndexState::Ready(index) => Ok(Arc::clone(index)),
            IndexState::Pending => Err(SearchError::unavailable("index is still loading")),
            IndexState::Failed(reason) => Err(SearchError::unavailable(reason.clone())),
        }
    }

    /// Swap in an already parsed index.
    pub fn set_index(&self, index: SearchIndex) {
        *self.state.write() = IndexState::Ready(Arc::new(index));
    }

    fn settle(&self, result: Result<SearchIndex, LoadError>) -> Result<(), LoadError> {
        match result {
            Ok(index) => {
                tracing::info!(records = index.len(), "search index loaded");
                self.set_index(index);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load search index");
                let mut state = self.state.write();
                // A failed reload keeps serving the last good index.
                if !matches!(&*state, IndexState::Ready(_)) {
                    *state = IndexState::Failed(e.to_string());
                }
                Err(e)
            }
        }
    }

    /// Parse an index artifact from a JSON string.
    pub fn load_from_str(&self, json: &str) -> Result<(), LoadError> {
        self.settle(serde_json::from_str(json).map_err(LoadError::from))
    }

    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<(), LoadError> {
        self.settle(serde_json::from_reader(reader).map_err(LoadError::from))
    }

    /// Read and parse the index artifact at `path`. Single attempt.
    pub fn load_from_path(&self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let result = File::open(path)
            .map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|file| {
                serde_json::from_reader(BufReader::new(file)).map_err(LoadError::from)
            });
        self.settle(result)
    }

    /// Retry a load, e.g. after a failed fetch. A ready engine keeps serving
    /// its current index until the new one parses.
    pub fn reload(&self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        self.load_from_path(path)
    }

    /// Load `path` on a background thread and return immediately.
    ///
    /// Searches issued before the load settles get
    /// [`SearchError::IndexUnavailable`] instead of blocking.
    pub fn spawn_load(&self, path: impl Into<PathBuf>) -> LoadHandle {
        let path = path.into();
        {
            let mut state = self.state.write();
            if matches!(&*state, IndexState::Failed(_)) {
                *state = IndexState::Pending;
            }
        }

        let (tx, rx) = mpsc::channel();
        let engine = self.clone();
        let task = move || {
            let _ = tx.send(engine.load_from_path(&path));
        };

        #[cfg(feature = "parallel")]
        rayon::spawn(task);
        #[cfg(not(feature = "parallel"))]
        std::thread::spawn(task);

        LoadHandle {
            engine: self.clone(),
            done: rx,
        }
    }

    /// Ranked hits for `query`.
    ///
    /// An empty query is answered with no hits whether or not the index is
    /// loaded. Any other query needs a ready index.
    pub fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchHit>, SearchError> {
        self.search_limited(query, filters, None)
    }

    pub fn search_limited(
        &self,
        query: &str,
        filters: &SearchFilters,
        limit: Option<usize>,
    ) -> Result<Vec<SearchHit>, SearchError> {
        if tokenize_query(query).is_empty() {
            return Ok(Vec::new());
        }
        let index = self.index()?;
        Ok(search_limited(&index, query, filters, limit))
    }

    /// A fresh session with no filters.
    pub fn session(&self) -> SearchSession {
        SearchSession::new(self.clone())
    }
}

/// Completion handle for [`SearchEngine::spawn_load`].
#[derive(Debug)]
pub struct LoadHandle {
    engine: SearchEngine,
    done: mpsc::Receiver<Result<(), LoadError>>,
}

impl LoadHandle {
    /// Block until the load settles and report the resulting state.
    pub fn wait(self) -> EngineStatus {
        if let Ok(Err(e)) = self.done.recv() {
            tracing::debug!(error = %e, "background load finished with error");
        }
        self.engine.status()
    }
}

/// One caller's view of an engine: facet selections and the last query.
#[derive(Clone, Debug)]
pub struct SearchSession {
    engine: SearchEngine,
    filters: SearchFilters,
    last_query: Option<String>,
}

impl SearchSession {
    pub fn new(engine: SearchEngine) -> Self {
        Self {
            engine,
            filters: SearchFilters::all(),
            last_query: None,
        }
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Select a brand, or `"all"` to clear.
    pub fn set_brand_filter(&mut self, brand: &str) {
        self.filters.brand = SearchFilters::parse(brand, "")
            .ok()
            .and_then(|f| f.brand);
    }

    /// Select a record type, or `"all"` to clear. Unknown types are rejected
    /// and leave the current selection alone.
    pub fn set_type_filter(&mut self, record_type: &str) -> Result<(), SearchError> {
        self.filters.record_type = SearchFilters::parse("", record_type)?.record_type;
        Ok(())
    }

    /// Run `query` with this session's filters and remember it.
    pub fn search(&mut self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        let trimmed = query.trim();
        self.last_query = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self.engine.search(query, &self.filters)
    }

    /// Re-run the last query, typically after a filter change.
    pub fn rerun(&self) -> Result<Vec<SearchHit>, SearchError> {
        match &self.last_query {
            Some(query) => self.engine.search(query, &self.filters),
            None => Ok(Vec::new()),
        }
    }
}
