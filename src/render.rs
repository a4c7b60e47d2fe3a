//! HTML rendering for result lists.
//!
//! The markup matches what the site's stylesheet expects: a count line, then
//! one `search-result-card` article per hit. All record text is escaped before
//! `<mark>` tags go in.

use serde::Serialize;

use crate::search::highlight_html;
use crate::types::{IndexedRecord, RecordType, SearchHit};
use crate::utils::{escape_html, truncate_chars};

/// Card descriptions are cut to this many characters.
pub const SNIPPET_CHARS: usize = 200;

pub const PLACEHOLDER_HTML: &str = r#"<p class="search-placeholder">Enter a search term to find related issues and solutions.</p>"#;

const NO_RESULTS_HTML: &str = r#"<div class="no-results">
<h3>No results found</h3>
<p>Try different keywords or check your spelling. You can search by:</p>
<ul>
<li>Model name (E30, 944, 996, etc.)</li>
<li>Issue type (timing belt, cooling, electrical, etc.)</li>
<li>Symptoms (overheating, rough idle, oil leak, etc.)</li>
</ul>
</div>"#;

/// Shorten `text` to `max_chars`, appending `...` when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    truncate_chars(text, max_chars)
}

/// "1 result found", "3 results found".
pub fn results_summary(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{} result{} found", count, plural)
}

/// Human label for a record type.
pub fn type_label(record_type: RecordType) -> &'static str {
    match record_type {
        RecordType::Issue => "Issue",
        RecordType::Torque => "Torque Spec",
        RecordType::Guide => "Guide",
        RecordType::Supplier => "Supplier",
    }
}

/// Section name on the vehicle page, as used in "View all ..." links.
fn section_name(record_type: RecordType) -> &'static str {
    match record_type {
        RecordType::Issue => "issues",
        RecordType::Torque => "torque specs",
        RecordType::Guide => "guides",
        RecordType::Supplier => "suppliers",
    }
}

/// One labelled line under the card title. `value_html` is already escaped.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardDetail {
    pub label: &'static str,
    pub value_html: String,
}

/// Everything a result card shows, ready to drop into markup.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultCard {
    pub brand: String,
    pub badge_class: String,
    pub model_label: String,
    pub type_label: &'static str,
    pub title_html: String,
    pub anchor: String,
    pub details: Vec<CardDetail>,
    pub snippet_html: String,
    pub url: String,
    pub section_link_text: String,
}

impl ResultCard {
    pub fn from_hit(hit: &SearchHit, query: &str) -> Self {
        let record = &hit.record;
        let detail = |label, value: &str| CardDetail {
            label,
            value_html: highlight_html(value, query),
        };

        let (details, snippet) = match record {
            IndexedRecord::Issue(r) => (vec![detail("Symptoms", &r.symptoms)], &r.description),
            IndexedRecord::Torque(r) => (
                vec![detail("Spec", &r.spec), detail("Category", &r.category)],
                &r.notes,
            ),
            IndexedRecord::Guide(r) => (
                vec![
                    detail("Difficulty", &r.difficulty),
                    detail("Time", &r.time),
                    detail("Type", r.kind.as_str()),
                ],
                &r.description,
            ),
            IndexedRecord::Supplier(r) => (vec![detail("Category", &r.category)], &r.notes),
        };

        Self {
            brand: record.brand().to_string(),
            badge_class: record.brand().to_lowercase(),
            model_label: format!("{} ({})", record.model_name(), record.years()),
            type_label: type_label(hit.record_type),
            title_html: highlight_html(record.label(), query),
            anchor: record.anchor(),
            details: details
                .into_iter()
                .filter(|d| !d.value_html.is_empty())
                .collect(),
            snippet_html: highlight_html(&truncate_text(snippet, SNIPPET_CHARS), query),
            url: record.url().to_string(),
            section_link_text: format!(
                "View all {} {}",
                record.model_name(),
                section_name(hit.record_type)
            ),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<article class=\"search-result-card\">\n");
        html.push_str("<div class=\"result-header\">\n");
        html.push_str(&format!(
            "<span class=\"result-badge {}\">{}</span>\n",
            escape_html(&self.badge_class),
            escape_html(&self.brand)
        ));
        html.push_str(&format!(
            "<span class=\"result-model\">{}</span>\n",
            escape_html(&self.model_label)
        ));
        html.push_str(&format!(
            "<span class=\"result-type\">{}</span>\n",
            self.type_label
        ));
        html.push_str("</div>\n");
        html.push_str(&format!(
            "<h3 class=\"result-title\"><a href=\"{}\">{}</a></h3>\n",
            escape_html(&self.anchor),
            self.title_html
        ));
        for detail in &self.details {
            html.push_str(&format!(
                "<p class=\"result-detail\"><strong>{}:</strong> {}</p>\n",
                detail.label, detail.value_html
            ));
        }
        if !self.snippet_html.is_empty() {
            html.push_str(&format!(
                "<p class=\"result-description\">{}</p>\n",
                self.snippet_html
            ));
        }
        html.push_str(&format!(
            "<a href=\"{}\" class=\"result-link\">{} &rarr;</a>\n",
            escape_html(&self.url),
            escape_html(&self.section_link_text)
        ));
        html.push_str("</article>\n");
        html
    }
}

/// The full results panel for `query`.
///
/// Empty query: the placeholder prompt. No hits: the "No results found"
/// block with search hints. Otherwise the count line and one card per hit.
pub fn render_results_html(results: &[SearchHit], query: &str) -> String {
    if query.trim().is_empty() {
        return PLACEHOLDER_HTML.to_string();
    }
    if results.is_empty() {
        return NO_RESULTS_HTML.to_string();
    }

    let mut html = format!(
        "<div class=\"results-count\">{}</div>\n",
        results_summary(results.len())
    );
    for hit in results {
        html.push_str(&ResultCard::from_hit(hit, query).to_html());
    }
    html
}
