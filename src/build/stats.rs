use serde::Serialize;

use super::document::VehicleRecord;

/// Supplier categories counted on the site's stats banner.
const COUNTED_SUPPLIER_CATEGORIES: [&str; 3] = ["oem", "aftermarket", "used"];

/// Content totals shown on the home page counters.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    /// Restoration plus DIY guides.
    pub guides: usize,
    pub restoration_guides: usize,
    pub diy_guides: usize,
    pub torque_specs: usize,
    pub suppliers: usize,
    pub vehicles: usize,
}

impl SiteStats {
    /// Totals over a set of vehicle records.
    ///
    /// Torque spec categories that hold metadata instead of a spec list are
    /// skipped. Suppliers only count the `oem`, `aftermarket` and `used`
    /// categories.
    pub fn collect<'a>(vehicles: impl IntoIterator<Item = &'a VehicleRecord>) -> Self {
        let mut stats = SiteStats::default();
        for vehicle in vehicles {
            stats.vehicles += 1;
            stats.restoration_guides += vehicle.guides.len();
            stats.diy_guides += vehicle.diy_guides.len();
            stats.torque_specs += vehicle
                .torque_specs
                .values()
                .map(|specs| specs.entries().len())
                .sum::<usize>();
            stats.suppliers += COUNTED_SUPPLIER_CATEGORIES
                .iter()
                .filter_map(|category| vehicle.suppliers.get(*category))
                .map(|suppliers| suppliers.entries().len())
                .sum::<usize>();
        }
        stats.guides = stats.restoration_guides + stats.diy_guides;
        stats
    }
}
