//! End-to-end tests: vehicle files on disk to the written artifact.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use resto_search::build::{compute_crc32, run_build, BuildConfig};
use resto_search::{BuildError, SearchIndex};

use crate::common::{
    assert_index_well_formed, sample_index, sample_vehicles, write_vehicle_files,
    INVALID_FIXTURES, VALID_FIXTURES,
};

fn config(input: &Path, output: &Path) -> BuildConfig {
    BuildConfig::new(input, output)
}

fn read_index(path: &Path) -> SearchIndex {
    let bytes = fs::read(path).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn test_build_from_fixture_directory() {
    let out = TempDir::new().unwrap();
    let output = out.path().join("search-index.json");

    let summary = run_build(&config(Path::new(VALID_FIXTURES), &output)).unwrap();

    assert_eq!(summary.vehicles, 2);
    assert_eq!(summary.issues, 3);
    assert_eq!(summary.torque_specs, 3);
    assert_eq!(summary.guides, 3);
    assert_eq!(summary.suppliers, 4);

    let bytes = fs::read(&output).unwrap();
    assert_eq!(summary.bytes, bytes.len());
    assert_eq!(summary.checksum, compute_crc32(&bytes));
    assert!(summary.brotli_bytes < summary.bytes);

    let index = read_index(&output);
    assert_index_well_formed(&index);
}

#[test]
fn test_files_load_in_sorted_order() {
    let out = TempDir::new().unwrap();
    let output = out.path().join("index.json");
    run_build(&config(Path::new(VALID_FIXTURES), &output)).unwrap();

    // 944.json sorts before e30.json.
    let index = read_index(&output);
    assert_eq!(index.issues[0].id, "944-battery-tray");
    assert_eq!(index.issues[1].id, "e30-rust-1");
}

#[test]
fn test_written_vehicles_match_in_memory_build() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    // Single vehicle so load order can't differ from the in-memory order.
    let vehicles = sample_vehicles();
    write_vehicle_files(input.path(), &vehicles[..1]).unwrap();

    let output = out.path().join("index.json");
    run_build(&config(input.path(), &output)).unwrap();

    let expected = resto_search::build_index(&vehicles[..1]).unwrap();
    assert_eq!(read_index(&output), expected);
}

#[test]
fn test_rebuild_is_byte_identical() {
    let out = TempDir::new().unwrap();
    let first = out.path().join("a.json");
    let second = out.path().join("b.json");

    run_build(&config(Path::new(VALID_FIXTURES), &first)).unwrap();
    run_build(&config(Path::new(VALID_FIXTURES), &second)).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_pretty_and_compact_parse_to_same_index() {
    let out = TempDir::new().unwrap();
    let pretty = out.path().join("pretty.json");
    let compact = out.path().join("compact.json");

    run_build(&config(Path::new(VALID_FIXTURES), &pretty)).unwrap();
    let mut compact_config = config(Path::new(VALID_FIXTURES), &compact);
    compact_config.pretty = false;
    run_build(&compact_config).unwrap();

    let pretty_text = fs::read_to_string(&pretty).unwrap();
    let compact_text = fs::read_to_string(&compact).unwrap();
    assert!(pretty_text.contains("\n  \"issues\""));
    assert!(!compact_text.contains('\n'));
    assert!(compact_text.len() < pretty_text.len());
    assert_eq!(read_index(&pretty), read_index(&compact));
}

#[test]
fn test_output_directory_is_created() {
    let out = TempDir::new().unwrap();
    let output = out.path().join("site").join("assets").join("search-index.json");

    run_build(&config(Path::new(VALID_FIXTURES), &output)).unwrap();
    assert!(output.exists());
}

#[test]
fn test_missing_brand_fails_without_writing() {
    let out = TempDir::new().unwrap();
    let output = out.path().join("index.json");

    let err = run_build(&config(Path::new(INVALID_FIXTURES), &output)).unwrap_err();
    match err {
        BuildError::MissingField { origin, field } => {
            assert_eq!(origin, "w123.json");
            assert_eq!(field, "brand");
        }
        other => panic!("expected MissingField, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_failed_build_keeps_previous_artifact() {
    let out = TempDir::new().unwrap();
    let output = out.path().join("index.json");
    run_build(&config(Path::new(VALID_FIXTURES), &output)).unwrap();
    let before = fs::read(&output).unwrap();

    assert!(run_build(&config(Path::new(INVALID_FIXTURES), &output)).is_err());
    assert_eq!(fs::read(&output).unwrap(), before);
}

#[test]
fn test_malformed_json_is_parse_error() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::write(input.path().join("broken.json"), "{ \"brand\": ").unwrap();

    let err = run_build(&config(input.path(), &out.path().join("index.json"))).unwrap_err();
    match err {
        BuildError::Parse { path, .. } => assert!(path.ends_with("broken.json")),
        other => panic!("expected Parse, got {:?}", other),
    }
}

#[test]
fn test_empty_directory_writes_empty_index() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("index.json");

    let summary = run_build(&config(input.path(), &output)).unwrap();
    assert_eq!(summary.vehicles, 0);
    assert!(read_index(&output).is_empty());
}

#[test]
fn test_missing_input_directory_is_io_error() {
    let out = TempDir::new().unwrap();
    let missing = out.path().join("no-such-dir");

    let err = run_build(&config(&missing, &out.path().join("index.json"))).unwrap_err();
    assert!(matches!(err, BuildError::Io { .. }));
}

#[test]
fn test_artifact_loads_into_engine() {
    let out = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    write_vehicle_files(input.path(), &sample_vehicles()).unwrap();
    let output = out.path().join("index.json");
    run_build(&config(input.path(), &output)).unwrap();

    let engine = resto_search::SearchEngine::new();
    engine.load_from_path(&output).unwrap();
    let loaded = engine.index().unwrap();
    assert_eq!(loaded.len(), sample_index().len());
}
