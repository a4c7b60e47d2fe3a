//! Tier scoring and ranking over the fixture index.

use resto_search::build::build_index;
use resto_search::{score_record, search, RecordType, SearchFilters};

use crate::common::{assert_ranked, ids, make_issue, make_vehicle, sample_index};

#[test]
fn test_model_match_scores_every_e30_record() {
    let index = sample_index();
    let hits = search(&index, "e30", &SearchFilters::all());

    assert_eq!(hits.len(), 8);
    assert!(hits.iter().all(|h| h.score == 15.0));
    assert!(hits.iter().all(|h| h.record.model() == "E30"));
    assert_ranked(&hits);
}

#[test]
fn test_ties_keep_collection_order() {
    let index = sample_index();
    let hits = search(&index, "e30", &SearchFilters::all());
    let types: Vec<RecordType> = hits.iter().map(|h| h.record_type).collect();
    assert_eq!(
        types,
        vec![
            RecordType::Issue,
            RecordType::Issue,
            RecordType::Torque,
            RecordType::Torque,
            RecordType::Guide,
            RecordType::Guide,
            RecordType::Supplier,
            RecordType::Supplier,
        ]
    );
}

#[test]
fn test_first_matching_tier_wins() {
    // "arch" is in the title and the keywords; only the title tier counts.
    let index = sample_index();
    let hits = search(&index, "arch", &SearchFilters::all());
    assert_eq!(ids(&hits), vec!["e30-rust-1", "e30-rust-repair"]);
    assert!(hits.iter().all(|h| h.score == 12.0));
}

#[test]
fn test_keyword_match_outranks_brand_match() {
    let index = sample_index();
    let hits = search(&index, "porsche", &SearchFilters::all());

    assert_eq!(hits.len(), 5);
    assert_eq!(hits[0].record.id(), "944-aftermarket-pelican-parts");
    assert_eq!(hits[0].score, 7.5);
    assert!(hits[1..].iter().all(|h| h.score == 3.0));
}

#[test]
fn test_catch_all_tier_matches_years() {
    let index = sample_index();
    let hits = search(&index, "1991", &SearchFilters::all());
    assert_eq!(hits.len(), 5);
    assert!(hits.iter().all(|h| h.record.model() == "944"));
    assert!(hits.iter().all(|h| h.score == 1.5));
}

#[test]
fn test_full_coverage_bonus() {
    let index = sample_index();

    let both = search(&index, "head bolts", &SearchFilters::all());
    assert_eq!(
        ids(&both)[..2],
        ["e30-engine-head-bolts-m20-", "944-engine-head-bolts"]
    );
    assert_eq!(both[0].score, 24.0);

    // Lug bolts match "bolts" only: no bonus.
    let lug = both
        .iter()
        .find(|h| h.record.id() == "e30-suspension-wheel-lug-bolts")
        .unwrap();
    assert_eq!(lug.score, 8.0);
}

#[test]
fn test_unmatched_term_removes_bonus() {
    let index = sample_index();
    let hits = search(&index, "e30 zzzz", &SearchFilters::all());
    assert_eq!(hits.len(), 8);
    assert!(hits.iter().all(|h| h.score == 10.0));
}

#[test]
fn test_adding_a_matching_term_never_lowers_score() {
    let index = sample_index();
    let one = search(&index, "timing", &SearchFilters::all());
    let two = search(&index, "timing belt", &SearchFilters::all());

    let score = |hits: &[resto_search::SearchHit], id: &str| {
        hits.iter()
            .find(|h| h.record.id() == id)
            .map(|h| h.score)
            .unwrap_or(0.0)
    };
    assert!(score(&two, "e30-timing-1") >= score(&one, "e30-timing-1"));
}

#[test]
fn test_query_is_case_insensitive() {
    let index = sample_index();
    assert_eq!(
        search(&index, "FCP EURO", &SearchFilters::all()),
        search(&index, "fcp euro", &SearchFilters::all())
    );
}

#[test]
fn test_single_character_terms_are_ignored() {
    let index = sample_index();
    assert!(search(&index, "a", &SearchFilters::all()).is_empty());
    assert_eq!(
        search(&index, "a clutch", &SearchFilters::all()),
        search(&index, "clutch", &SearchFilters::all())
    );
}

#[test]
fn test_no_match_is_empty() {
    let index = sample_index();
    assert!(search(&index, "flux capacitor", &SearchFilters::all()).is_empty());
}

#[test]
fn test_model_term_outranks_description_term() {
    let mut vehicle = make_vehicle("BMW", "E30", "BMW E30 3-Series");
    vehicle.years = "1982-1994".to_string();
    vehicle.issues = vec![make_issue(
        "swap-1",
        "Cooling after engine swap",
        "Overheating in traffic",
        "Common on v8 conversions with the stock radiator.",
    )];
    let index = build_index(&[vehicle]).unwrap();
    let issue = &index.issues[0];
    assert!(!issue.keywords.split(' ').any(|k| k == "v8"));

    let model = score_record(issue, &["e30"]);
    let description = score_record(issue, &["v8"]);
    assert!(description > 0.0);
    assert!(model >= description, "model {model} < description {description}");
    assert_eq!(model, 15.0);
    assert_eq!(description, 4.5);
}
