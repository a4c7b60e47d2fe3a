//! Tests for flattening vehicle records into the index collections.

use std::fs;

use tempfile::TempDir;

use resto_search::build::{build_index, load_vehicle};
use resto_search::{BuildError, GuideKind, VehicleRecord};

use crate::common::{
    assert_index_well_formed, e30_full_vehicle, e30_rust_vehicle, make_guide, make_vehicle,
    porsche_944_vehicle, sample_index, sample_vehicles,
};

#[test]
fn test_e30_rust_scenario() {
    let index = build_index(&[e30_rust_vehicle()]).unwrap();

    assert_eq!(index.issues.len(), 1);
    let issue = &index.issues[0];
    assert_eq!(issue.id, "e30-rust-1");
    assert_eq!(issue.brand, "BMW");
    assert_eq!(issue.model, "E30");
    assert_eq!(issue.model_name, "E30 3-Series");
    assert_eq!(issue.years, "1982-1994");
    assert_eq!(issue.url, "/resources/bmw/e30/");
    assert_eq!(
        issue.keywords,
        "rear wheel arch rust bubbling paint visible common point behind wheels e30 chassis"
    );
}

#[test]
fn test_collections_in_source_order() {
    let index = sample_index();

    let issue_ids: Vec<&str> = index.issues.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(issue_ids, vec!["e30-rust-1", "e30-timing-1", "944-battery-tray"]);

    let torque_ids: Vec<&str> = index.torque_specs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        torque_ids,
        vec![
            "e30-engine-head-bolts-m20-",
            "e30-suspension-wheel-lug-bolts",
            "944-engine-head-bolts",
        ]
    );

    let supplier_ids: Vec<&str> = index.suppliers.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        supplier_ids,
        vec![
            "e30-oem-bmw-classic",
            "e30-aftermarket-fcp-euro",
            "944-aftermarket-pelican-parts",
            "944-specialist-944-enhancement",
        ]
    );
}

#[test]
fn test_guides_restoration_then_diy() {
    let index = build_index(&[e30_full_vehicle()]).unwrap();
    let guides: Vec<(&str, GuideKind)> = index
        .guides
        .iter()
        .map(|g| (g.id.as_str(), g.kind))
        .collect();
    assert_eq!(
        guides,
        vec![
            ("e30-rust-repair", GuideKind::Restoration),
            ("e30-oil-change", GuideKind::Diy),
        ]
    );
    assert_eq!(
        index.guides[1].keywords,
        "oil change drain and refill engine oil easy diy"
    );
}

#[test]
fn test_metadata_category_is_skipped() {
    let index = build_index(&[porsche_944_vehicle()]).unwrap();
    assert_eq!(index.torque_specs.len(), 1);
    assert!(index.torque_specs.iter().all(|t| t.category != "sources"));
}

#[test]
fn test_missing_notes_become_empty() {
    let index = sample_index();
    let lug = index
        .torque_specs
        .iter()
        .find(|t| t.id == "e30-suspension-wheel-lug-bolts")
        .unwrap();
    assert_eq!(lug.notes, "");
    assert_eq!(lug.keywords, "wheel lug bolts suspension torque spec ft-lbs");

    let specialist = index
        .suppliers
        .iter()
        .find(|s| s.id == "944-specialist-944-enhancement")
        .unwrap();
    assert_eq!(specialist.notes, "");
    assert_eq!(
        specialist.keywords,
        "944 enhancement specialist parts supplier"
    );
}

#[test]
fn test_torque_keywords_are_plain_concatenation() {
    let index = sample_index();
    assert_eq!(
        index.torque_specs[0].keywords,
        "head bolts (m20) engine torque spec ft-lbs torque angle after stage 1"
    );
}

#[test]
fn test_sample_index_well_formed() {
    assert_index_well_formed(&sample_index());
}

#[test]
fn test_every_record_shares_vehicle_identity() {
    let index = sample_index();
    for supplier in &index.suppliers {
        match supplier.model.as_str() {
            "E30" => {
                assert_eq!(supplier.model_name, "E30 3-Series");
                assert_eq!(supplier.years, "1982-1994");
            }
            "944" => {
                assert_eq!(supplier.model_name, "944");
                assert_eq!(supplier.years, "1982-1991");
            }
            other => panic!("unexpected model {}", other),
        }
    }
}

#[test]
fn test_build_is_deterministic() {
    let first = serde_json::to_vec_pretty(&build_index(&sample_vehicles()).unwrap()).unwrap();
    let second = serde_json::to_vec_pretty(&build_index(&sample_vehicles()).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_model_name_without_brand_prefix() {
    let mut vehicle = make_vehicle("Mercedes-Benz", "W123", "W123 Series");
    vehicle.issues = e30_rust_vehicle().issues;
    let index = build_index(&[vehicle]).unwrap();
    assert_eq!(index.issues[0].model_name, "W123 Series");
    assert_eq!(index.issues[0].url, "/resources/mercedes-benz/w123/");
}

#[test]
fn test_missing_full_name_is_fatal() {
    let vehicle = make_vehicle("BMW", "E30", "");
    let err = build_index(&[vehicle]).unwrap_err();
    assert!(matches!(
        err,
        BuildError::MissingField {
            field: "fullName",
            ..
        }
    ));
}

#[test]
fn test_guide_id_shared_by_restoration_and_diy_is_fatal() {
    let mut vehicle = make_vehicle("BMW", "E30", "BMW E30 3-Series");
    vehicle.guides = vec![make_guide("brakes", "Brake overhaul", "", "Medium", "1 day")];
    vehicle.diy_guides = vec![make_guide("brakes", "Brake pads", "", "Easy", "2 hours")];
    let err = build_index(&[vehicle]).unwrap_err();
    match err {
        BuildError::DuplicateId { collection, id } => {
            assert_eq!(collection, "guides");
            assert_eq!(id, "e30-brakes");
        }
        other => panic!("expected DuplicateId, got {:?}", other),
    }
}

#[test]
fn test_empty_input_builds_empty_index() {
    let index = build_index(&[]).unwrap();
    assert!(index.is_empty());
}

const E30_TORQUE_JSON: &str = r#"{
    "brand": "BMW",
    "model": "E30",
    "fullName": "BMW E30 3-Series",
    "torqueSpecs": {
        "engine": [
            {"component": "Head bolts", "spec": "30 ft-lbs"},
            {"component": "Oil drain plug"}
        ]
    }
}"#;

#[test]
fn test_torque_entry_without_spec_is_indexed() {
    let vehicle: VehicleRecord = serde_json::from_str(E30_TORQUE_JSON).unwrap();
    let index = build_index(&[vehicle]).unwrap();

    let specs: Vec<(&str, &str)> = index
        .torque_specs
        .iter()
        .map(|r| (r.component.as_str(), r.spec.as_str()))
        .collect();
    assert_eq!(specs, vec![("Head bolts", "30 ft-lbs"), ("Oil drain plug", "")]);
    assert_eq!(index.torque_specs[1].id, "e30-engine-oil-drain-plug");
}

#[test]
fn test_torque_entry_without_component_fails_file() {
    let json = E30_TORQUE_JSON.replace(r#"{"component": "Oil drain plug"}"#, r#"{"spec": "25 Nm"}"#);
    assert!(serde_json::from_str::<VehicleRecord>(&json).is_err());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("e30.json");
    fs::write(&path, json).unwrap();
    match load_vehicle(&path).unwrap_err() {
        BuildError::Parse { path: failed, source } => {
            assert!(failed.ends_with("e30.json"));
            assert!(source.to_string().contains("component"));
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn test_model_code_with_two_identities_is_fatal() {
    let mut sedan = make_vehicle("BMW", "E30", "BMW E30 3-Series");
    sedan.years = "1982-1994".to_string();
    let mut m3 = make_vehicle("BMW", "E30", "BMW E30 M3");
    m3.years = "1986-1991".to_string();

    let err = build_index(&[sedan, m3]).unwrap_err();
    assert!(matches!(err, BuildError::ConflictingModel { ref model, .. } if model == "E30"));
    assert!(err.to_string().contains("1986-1991"));
}
