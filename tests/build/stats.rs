//! Site stats over the fixture vehicles.

use std::path::Path;

use resto_search::build::{load_vehicles, SiteStats};

use crate::common::{sample_vehicles, VALID_FIXTURES};

#[test]
fn test_stats_over_fixture_directory() {
    let vehicles = load_vehicles(Path::new(VALID_FIXTURES)).unwrap();
    let stats = SiteStats::collect(vehicles.iter().map(|v| &v.record));

    assert_eq!(stats.vehicles, 2);
    assert_eq!(stats.restoration_guides, 1);
    assert_eq!(stats.diy_guides, 2);
    assert_eq!(stats.guides, 3);
    // The metadata-only "sources" category holds no specs.
    assert_eq!(stats.torque_specs, 3);
    // "specialist" isn't a counted supplier category.
    assert_eq!(stats.suppliers, 3);
}

#[test]
fn test_stats_match_in_memory_fixtures() {
    let vehicles = load_vehicles(Path::new(VALID_FIXTURES)).unwrap();
    let from_disk = SiteStats::collect(vehicles.iter().map(|v| &v.record));
    let in_memory = SiteStats::collect(&sample_vehicles());
    assert_eq!(from_disk, in_memory);
}

#[test]
fn test_stats_of_nothing() {
    let stats = SiteStats::collect(std::iter::empty());
    assert_eq!(stats, SiteStats::default());
}
