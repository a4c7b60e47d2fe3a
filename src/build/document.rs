use indexmap::IndexMap;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One vehicle platform, as stored in `src/_data/vehicles/*.json`.
///
/// Identity fields default to empty so a record missing `brand` or `model`
/// reaches the builder and fails with a named field instead of a serde error.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub years: String,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub torque_specs: IndexMap<String, CategoryEntries<TorqueSpec>>,
    #[serde(default)]
    pub guides: Vec<Guide>,
    #[serde(default)]
    pub diy_guides: Vec<Guide>,
    #[serde(default)]
    pub suppliers: IndexMap<String, CategoryEntries<Supplier>>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct Issue {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub symptoms: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct TorqueSpec {
    pub component: String,
    #[serde(default)]
    pub spec: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct Guide {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub time: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct Supplier {
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Value of one category key in `torqueSpecs` or `suppliers`.
///
/// Vehicle files sometimes park metadata next to real categories (a `sources`
/// list of citation strings, for instance). A list of objects is a list of
/// entries and must parse as one: a single bad entry fails the whole file.
/// Anything else lands in `Metadata` and is ignored by the builder.
#[derive(Serialize, Clone, Debug)]
#[serde(untagged)]
pub enum CategoryEntries<T> {
    Entries(Vec<T>),
    Metadata(Value),
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for CategoryEntries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(items) if items.iter().all(Value::is_object) => {
                serde_json::from_value(Value::Array(items))
                    .map(CategoryEntries::Entries)
                    .map_err(de::Error::custom)
            }
            other => Ok(CategoryEntries::Metadata(other)),
        }
    }
}

impl<T> CategoryEntries<T> {
    pub fn entries(&self) -> &[T] {
        match self {
            CategoryEntries::Entries(entries) => entries,
            CategoryEntries::Metadata(_) => &[],
        }
    }
}

impl<T> Default for CategoryEntries<T> {
    fn default() -> Self {
        CategoryEntries::Entries(Vec::new())
    }
}

/// A parsed vehicle record plus where it came from (for error messages).
#[derive(Clone, Debug)]
pub struct LoadedVehicle {
    pub origin: String,
    pub record: VehicleRecord,
}
