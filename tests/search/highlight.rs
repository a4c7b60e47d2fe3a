//! Highlighting and result rendering on real hits.

use resto_search::render::PLACEHOLDER_HTML;
use resto_search::search::{highlight_html, MARK_CLOSE, MARK_OPEN};
use resto_search::{highlight, render_results_html, search, ResultCard, SearchFilters};

use crate::common::sample_index;

#[test]
fn test_highlight_hit_titles() {
    let index = sample_index();
    let query = "arch rust";
    let hits = search(&index, query, &SearchFilters::all());

    let titles: Vec<String> = hits
        .iter()
        .map(|h| highlight(h.record.label(), query))
        .collect();
    assert_eq!(
        titles,
        vec![
            "Rear wheel <mark>arch</mark> <mark>rust</mark>",
            "Wheel <mark>arch</mark> <mark>rust</mark> repair",
            "Battery tray <mark>rust</mark>",
        ]
    );
}

#[test]
fn test_highlight_never_changes_text() {
    let index = sample_index();
    for hit in search(&index, "head bolts m20", &SearchFilters::all()) {
        let marked = highlight(hit.record.label(), "head bolts m20");
        let stripped = marked.replace(MARK_OPEN, "").replace(MARK_CLOSE, "");
        assert_eq!(stripped, hit.record.label());
    }
}

#[test]
fn test_render_result_panel() {
    let index = sample_index();
    let query = "arch rust";
    let hits = search(&index, query, &SearchFilters::all());
    let html = render_results_html(&hits, query);

    assert!(html.starts_with("<div class=\"results-count\">3 results found</div>"));
    assert_eq!(html.matches("class=\"search-result-card\"").count(), 3);
    assert!(html.contains(
        "<a href=\"/resources/bmw/e30/#e30-rust-1\">Rear wheel <mark>arch</mark> <mark>rust</mark></a>"
    ));
}

#[test]
fn test_render_empty_states() {
    let index = sample_index();
    assert_eq!(render_results_html(&[], "  "), PLACEHOLDER_HTML);

    let hits = search(&index, "flux capacitor", &SearchFilters::all());
    assert!(render_results_html(&hits, "flux capacitor").contains("No results found"));
}

#[test]
fn test_torque_card_details() {
    let index = sample_index();
    let filters = SearchFilters::all().with_brand("Porsche");
    let hits = search(&index, "head bolts", &filters);
    let card = ResultCard::from_hit(&hits[0], "head bolts");

    assert_eq!(card.type_label, "Torque Spec");
    assert_eq!(card.model_label, "944 (1982-1991)");
    assert_eq!(card.anchor, "/resources/porsche/944/#944-engine-head-bolts");
    let labels: Vec<&str> = card.details.iter().map(|d| d.label).collect();
    assert_eq!(labels, vec!["Spec", "Category"]);
    assert_eq!(card.snippet_html, "Final stage");
    assert_eq!(card.section_link_text, "View all 944 torque specs");
}

#[test]
fn test_supplier_card_without_notes_has_no_snippet() {
    let index = sample_index();
    let hits = search(&index, "enhancement", &SearchFilters::all());
    let card = ResultCard::from_hit(&hits[0], "enhancement");
    assert_eq!(card.title_html, "944 <mark>Enhancement</mark>");
    assert_eq!(card.snippet_html, "");
    assert!(!card.to_html().contains("result-description"));
}

#[test]
fn test_html_highlight_escapes_record_text() {
    assert_eq!(
        highlight_html("Cut & weld <patch>", "weld"),
        "Cut &amp; <mark>weld</mark> &lt;patch&gt;"
    );
}
