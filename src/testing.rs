//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides the canonical fixture vehicles so every test suite searches
//! the same small garage.

#![doc(hidden)]

use std::fs;
use std::io;
use std::path::Path;

use indexmap::IndexMap;

use crate::build::{
    build_index, CategoryEntries, Guide, Issue, Supplier, TorqueSpec, VehicleRecord,
};
use crate::types::SearchIndex;

/// A vehicle with identity fields only.
pub fn make_vehicle(brand: &str, model: &str, full_name: &str) -> VehicleRecord {
    VehicleRecord {
        brand: brand.to_string(),
        model: model.to_string(),
        full_name: full_name.to_string(),
        ..Default::default()
    }
}

pub fn make_issue(id: &str, title: &str, symptoms: &str, description: &str) -> Issue {
    Issue {
        id: id.to_string(),
        title: title.to_string(),
        symptoms: symptoms.to_string(),
        description: description.to_string(),
    }
}

pub fn make_torque(component: &str, spec: &str, notes: Option<&str>) -> TorqueSpec {
    TorqueSpec {
        component: component.to_string(),
        spec: spec.to_string(),
        notes: notes.map(str::to_string),
    }
}

pub fn make_guide(id: &str, title: &str, description: &str, difficulty: &str, time: &str) -> Guide {
    Guide {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        difficulty: difficulty.to_string(),
        time: time.to_string(),
    }
}

pub fn make_supplier(name: &str, notes: Option<&str>) -> Supplier {
    Supplier {
        name: name.to_string(),
        notes: notes.map(str::to_string),
    }
}

/// The single-issue BMW E30 record from the rust-repair walkthrough.
pub fn e30_rust_vehicle() -> VehicleRecord {
    VehicleRecord {
        years: "1982-1994".to_string(),
        issues: vec![make_issue(
            "rust-1",
            "Rear wheel arch rust",
            "bubbling paint, visible rust",
            "Common rust point behind rear wheels on E30 chassis",
        )],
        ..make_vehicle("BMW", "E30", "BMW E30 3-Series")
    }
}

/// The E30 with every content type filled in.
pub fn e30_full_vehicle() -> VehicleRecord {
    let mut vehicle = e30_rust_vehicle();
    vehicle.issues.push(make_issue(
        "timing-1",
        "Timing belt failure",
        "engine will not start, bent valves",
        "The M20 engine uses a rubber timing belt that must be replaced every 60k miles",
    ));
    vehicle.torque_specs = IndexMap::from([
        (
            "engine".to_string(),
            CategoryEntries::Entries(vec![make_torque(
                "Head bolts (M20)",
                "Stage 1: 30 ft-lbs",
                Some("Torque angle after stage 1"),
            )]),
        ),
        (
            "suspension".to_string(),
            CategoryEntries::Entries(vec![make_torque("Wheel lug bolts", "81 ft-lbs", None)]),
        ),
    ]);
    vehicle.guides = vec![make_guide(
        "rust-repair",
        "Wheel arch rust repair",
        "Cut out and weld in patch panels",
        "Advanced",
        "2 weekends",
    )];
    vehicle.diy_guides = vec![make_guide(
        "oil-change",
        "Oil change",
        "Drain and refill engine oil",
        "Easy",
        "1 hour",
    )];
    vehicle.suppliers = IndexMap::from([
        (
            "oem".to_string(),
            CategoryEntries::Entries(vec![make_supplier("BMW Classic", Some("Factory parts"))]),
        ),
        (
            "aftermarket".to_string(),
            CategoryEntries::Entries(vec![make_supplier("FCP Euro", Some("Lifetime warranty"))]),
        ),
    ]);
    vehicle
}

/// A Porsche 944, including a metadata-only torque category.
pub fn porsche_944_vehicle() -> VehicleRecord {
    VehicleRecord {
        years: "1982-1991".to_string(),
        issues: vec![make_issue(
            "battery-tray",
            "Battery tray rust",
            "corrosion under battery",
            "Acid leaks rot the tray and the floor beneath it",
        )],
        torque_specs: IndexMap::from([
            (
                "engine".to_string(),
                CategoryEntries::Entries(vec![make_torque(
                    "Head bolts",
                    "65 ft-lbs",
                    Some("Final stage"),
                )]),
            ),
            (
                "sources".to_string(),
                CategoryEntries::Metadata(serde_json::json!(["Factory workshop manual"])),
            ),
        ]),
        diy_guides: vec![make_guide(
            "clutch",
            "Clutch replacement",
            "Drop the transaxle and replace the clutch",
            "Hard",
            "2 days",
        )],
        suppliers: IndexMap::from([
            (
                "aftermarket".to_string(),
                CategoryEntries::Entries(vec![make_supplier(
                    "Pelican Parts",
                    Some("Large Porsche catalog"),
                )]),
            ),
            (
                "specialist".to_string(),
                CategoryEntries::Entries(vec![make_supplier("944 Enhancement", None)]),
            ),
        ]),
        ..make_vehicle("Porsche", "944", "Porsche 944")
    }
}

/// The fixture garage, in build order.
pub fn sample_vehicles() -> Vec<VehicleRecord> {
    vec![e30_full_vehicle(), porsche_944_vehicle()]
}

/// [`sample_vehicles`], built.
pub fn sample_index() -> SearchIndex {
    build_index(&sample_vehicles()).expect("fixture vehicles are valid")
}

/// [`sample_index`] as a pretty-printed artifact.
pub fn sample_index_json() -> String {
    serde_json::to_string_pretty(&sample_index()).expect("index serializes")
}

/// Write each vehicle to `<dir>/<model>.json`.
pub fn write_vehicle_files(dir: &Path, vehicles: &[VehicleRecord]) -> io::Result<()> {
    for vehicle in vehicles {
        let path = dir.join(format!("{}.json", vehicle.model.to_lowercase()));
        let json = serde_json::to_string_pretty(vehicle).map_err(io::Error::other)?;
        fs::write(path, json)?;
    }
    Ok(())
}
