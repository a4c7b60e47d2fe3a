//! WebAssembly bindings for the browser search page.
//!
//! Exposes one class, `RestoSearch`. The page fetches `search-index.json`
//! itself and hands the text to `loadJson`; until that succeeds every
//! non-empty search rejects with an "index unavailable" error, which the page
//! can show differently from an empty result list.

use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

use crate::engine::SearchEngine;
use crate::render::{render_results_html, results_summary};
use crate::search::{highlight, SearchFilters};
use crate::types::{IndexedRecord, RecordType};

/// Search hit shape handed to JavaScript.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultOutput<'a> {
    #[serde(rename = "type")]
    record_type: RecordType,
    score: f64,
    record: &'a IndexedRecord,
    anchor: String,
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct RestoSearch {
    engine: SearchEngine,
}

impl Default for RestoSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl RestoSearch {
    #[wasm_bindgen(constructor)]
    pub fn new() -> RestoSearch {
        RestoSearch {
            engine: SearchEngine::new(),
        }
    }

    /// Parse the index artifact. May be called again to retry or refresh.
    #[wasm_bindgen(js_name = loadJson)]
    pub fn load_json(&self, json: &str) -> Result<(), JsValue> {
        self.engine.load_from_str(json).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.engine.is_ready()
    }

    /// Ranked hits. `brand` and `type` take `"all"` (or nothing) for no filter.
    #[wasm_bindgen]
    pub fn search(
        &self,
        query: &str,
        brand: Option<String>,
        record_type: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let filters = SearchFilters::parse(
            brand.as_deref().unwrap_or(""),
            record_type.as_deref().unwrap_or(""),
        )
        .map_err(to_js_error)?;
        let hits = self.engine.search(query, &filters).map_err(to_js_error)?;

        let output: Vec<SearchResultOutput<'_>> = hits
            .iter()
            .map(|hit| SearchResultOutput {
                record_type: hit.record_type,
                score: hit.score,
                record: &hit.record,
                anchor: hit.record.anchor(),
            })
            .collect();
        to_value(&output).map_err(to_js_error)
    }

    /// Results panel markup for the same arguments as `search`.
    #[wasm_bindgen(js_name = renderResults)]
    pub fn render_results(
        &self,
        query: &str,
        brand: Option<String>,
        record_type: Option<String>,
    ) -> Result<String, JsValue> {
        let filters = SearchFilters::parse(
            brand.as_deref().unwrap_or(""),
            record_type.as_deref().unwrap_or(""),
        )
        .map_err(to_js_error)?;
        let hits = self.engine.search(query, &filters).map_err(to_js_error)?;
        Ok(render_results_html(&hits, query))
    }

    /// Wrap query terms in `<mark>`. Does not need a loaded index.
    #[wasm_bindgen]
    pub fn highlight(&self, text: &str, query: &str) -> String {
        highlight(text, query)
    }

    #[wasm_bindgen(js_name = resultsSummary)]
    pub fn results_summary(&self, count: usize) -> String {
        results_summary(count)
    }
}
