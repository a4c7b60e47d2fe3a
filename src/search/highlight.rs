//! Query term highlighting.
//!
//! All terms go into one case-insensitive alternation, longest first, and the
//! text is scanned once. Overlapping terms ("rust", "rusty") therefore produce
//! a single marker around the longest match instead of nested ones, and the
//! inserted `<mark>` tags are never themselves searched.

use std::borrow::Cow;

use regex::{Regex, RegexBuilder};

use super::tokenize_query;
use crate::utils::escape_html;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

/// Build the single-pass matcher for a query, or `None` if it has no terms.
pub fn highlight_pattern(query: &str) -> Option<Regex> {
    let mut terms = tokenize_query(query);
    if terms.is_empty() {
        return None;
    }
    terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    terms.dedup();

    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");

    match RegexBuilder::new(&alternation).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(error = %e, "could not build highlight pattern");
            None
        }
    }
}

/// Wrap every case-insensitive occurrence of each query term in `<mark>`.
///
/// Text is returned as-is apart from the markers; use [`highlight_html`] when
/// the result goes into a page.
pub fn highlight(text: &str, query: &str) -> String {
    match highlight_pattern(query) {
        Some(re) => mark_matches(&re, text, |s| Cow::Borrowed(s)),
        None => text.to_string(),
    }
}

/// Like [`highlight`], but HTML-escapes the text around and inside matches.
///
/// Matching runs on the raw text, so a term such as `a&b` still finds
/// `A&B` even though the output spells it `A&amp;B`.
pub fn highlight_html(text: &str, query: &str) -> String {
    match highlight_pattern(query) {
        Some(re) => mark_matches(&re, text, |s| Cow::Owned(escape_html(s))),
        None => escape_html(text),
    }
}

fn mark_matches<'a>(re: &Regex, text: &'a str, emit: impl Fn(&'a str) -> Cow<'a, str>) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&emit(&text[last..m.start()]));
        out.push_str(MARK_OPEN);
        out.push_str(&emit(m.as_str()));
        out.push_str(MARK_CLOSE);
        last = m.end();
    }
    out.push_str(&emit(&text[last..]));
    out
}
