//! Engine lifecycle and per-caller sessions.

use std::fs;
use std::thread;

use tempfile::TempDir;

use resto_search::{EngineStatus, LoadError, SearchEngine, SearchFilters};

use crate::common::{ids, sample_index, sample_index_json};

fn write_index(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("search-index.json");
    fs::write(&path, sample_index_json()).unwrap();
    path
}

#[test]
fn test_search_before_load_is_unavailable() {
    let engine = SearchEngine::new();
    let err = engine.search("rust", &SearchFilters::all()).unwrap_err();
    assert!(err.is_unavailable());
}

#[test]
fn test_empty_query_needs_no_index() {
    let engine = SearchEngine::new();
    assert_eq!(engine.search("   ", &SearchFilters::all()).unwrap(), vec![]);
    assert_eq!(engine.search("a", &SearchFilters::all()).unwrap(), vec![]);
}

#[test]
fn test_load_from_path() {
    let dir = TempDir::new().unwrap();
    let engine = SearchEngine::new();
    engine.load_from_path(write_index(&dir)).unwrap();

    assert_eq!(engine.status(), EngineStatus::Ready { records: 13 });
    let hits = engine.search("e30", &SearchFilters::all()).unwrap();
    assert_eq!(hits.len(), 8);
}

#[test]
fn test_missing_artifact_fails_load() {
    let dir = TempDir::new().unwrap();
    let engine = SearchEngine::new();
    let err = engine
        .load_from_path(dir.path().join("missing.json"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(matches!(engine.status(), EngineStatus::Failed { .. }));
    assert!(engine
        .search("rust", &SearchFilters::all())
        .unwrap_err()
        .is_unavailable());
}

#[test]
fn test_retry_after_failure() {
    let dir = TempDir::new().unwrap();
    let engine = SearchEngine::new();
    let path = dir.path().join("search-index.json");

    assert!(engine.load_from_path(&path).is_err());
    fs::write(&path, sample_index_json()).unwrap();
    engine.reload(&path).unwrap();
    assert!(engine.is_ready());
}

#[test]
fn test_failed_reload_keeps_serving() {
    let dir = TempDir::new().unwrap();
    let path = write_index(&dir);
    let engine = SearchEngine::new();
    engine.load_from_path(&path).unwrap();

    fs::write(&path, "{\"issues\": [").unwrap();
    assert!(matches!(engine.reload(&path), Err(LoadError::Parse(_))));
    assert!(engine.is_ready());
    assert_eq!(engine.search("e30", &SearchFilters::all()).unwrap().len(), 8);
}

#[test]
fn test_spawn_load_settles() {
    let dir = TempDir::new().unwrap();
    let path = write_index(&dir);
    let engine = SearchEngine::new();

    let status = engine.spawn_load(path).wait();
    assert_eq!(status, EngineStatus::Ready { records: 13 });
    assert!(engine.is_ready());
}

#[test]
fn test_spawn_load_failure_reports_reason() {
    let dir = TempDir::new().unwrap();
    let engine = SearchEngine::new();
    match engine.spawn_load(dir.path().join("missing.json")).wait() {
        EngineStatus::Failed { reason } => assert!(reason.contains("missing.json")),
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[test]
fn test_clones_share_one_index() {
    let engine = SearchEngine::new();
    let clone = engine.clone();
    engine.set_index(sample_index());
    assert!(clone.is_ready());
}

#[test]
fn test_session_filters_and_rerun() {
    let engine = SearchEngine::with_index(sample_index());
    let mut session = engine.session();

    session.set_brand_filter("Porsche");
    let hits = session.search("head bolts").unwrap();
    assert_eq!(ids(&hits), vec!["944-engine-head-bolts"]);
    assert_eq!(session.last_query(), Some("head bolts"));

    session.set_brand_filter("all");
    assert_eq!(session.rerun().unwrap().len(), 3);
}

#[test]
fn test_session_rejects_unknown_type_and_keeps_selection() {
    let engine = SearchEngine::with_index(sample_index());
    let mut session = engine.session();
    session.set_type_filter("guide").unwrap();
    assert!(session.set_type_filter("manual").is_err());
    assert_eq!(
        session.filters().record_type,
        Some(resto_search::RecordType::Guide)
    );
}

#[test]
fn test_rerun_without_query_is_empty() {
    let session = SearchEngine::with_index(sample_index()).session();
    assert!(session.rerun().unwrap().is_empty());
}

#[test]
fn test_sessions_do_not_share_filters() {
    let engine = SearchEngine::with_index(sample_index());

    thread::scope(|scope| {
        let bmw = scope.spawn(|| {
            let mut session = engine.session();
            session.set_brand_filter("BMW");
            session.search("head bolts").unwrap()
        });
        let porsche = scope.spawn(|| {
            let mut session = engine.session();
            session.set_brand_filter("Porsche");
            session.search("head bolts").unwrap()
        });

        let bmw = bmw.join().unwrap();
        let porsche = porsche.join().unwrap();
        assert!(bmw.iter().all(|h| h.record.brand() == "BMW"));
        assert_eq!(bmw.len(), 2);
        assert_eq!(ids(&porsche), vec!["944-engine-head-bolts"]);
    });
}
