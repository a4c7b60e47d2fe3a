// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core types: what goes into the index artifact and what comes out of a search.
//!
//! The index is four flat collections, one per content type. Every record
//! carries a copy of its vehicle's identity (`brand`, `model`, `modelName`,
//! `years`, `url`) so the client never needs a join. The duplication is what
//! lets the search loop stay a single pass over plain structs.
//!
//! The JSON shape here is the wire contract between the build step and the
//! browser. Parsing is forward compatible: unknown keys are ignored, missing
//! collections come back empty.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// One known problem for a vehicle.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueRecord {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub model_name: String,
    pub years: String,
    pub title: String,
    pub symptoms: String,
    pub description: String,
    pub keywords: String,
    pub url: String,
}

/// One torque value, flattened out of its category.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TorqueSpecRecord {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub model_name: String,
    pub years: String,
    pub category: String,
    pub component: String,
    pub spec: String,
    pub notes: String,
    pub keywords: String,
    pub url: String,
}

/// Where a guide came from in the vehicle record.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GuideKind {
    #[default]
    Restoration,
    Diy,
}

impl GuideKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GuideKind::Restoration => "restoration",
            GuideKind::Diy => "diy",
        }
    }
}

impl fmt::Display for GuideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A restoration or DIY guide.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GuideRecord {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub model_name: String,
    pub years: String,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: GuideKind,
    pub keywords: String,
    pub url: String,
}

/// A parts supplier, flattened out of its category.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierRecord {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub model_name: String,
    pub years: String,
    pub name: String,
    pub category: String,
    pub notes: String,
    pub keywords: String,
    pub url: String,
}

/// The index artifact: four disjoint collections.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchIndex {
    pub issues: Vec<IssueRecord>,
    pub torque_specs: Vec<TorqueSpecRecord>,
    pub guides: Vec<GuideRecord>,
    pub suppliers: Vec<SupplierRecord>,
}

impl SearchIndex {
    /// Total number of records across all collections.
    pub fn len(&self) -> usize {
        self.issues.len() + self.torque_specs.len() + self.guides.len() + self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record count for one collection.
    pub fn count(&self, record_type: RecordType) -> usize {
        match record_type {
            RecordType::Issue => self.issues.len(),
            RecordType::Torque => self.torque_specs.len(),
            RecordType::Guide => self.guides.len(),
            RecordType::Supplier => self.suppliers.len(),
        }
    }

    /// Distinct brands in first-seen order.
    pub fn brands(&self) -> Vec<&str> {
        let mut brands: Vec<&str> = Vec::new();
        let all = self
            .issues
            .iter()
            .map(|r| r.brand.as_str())
            .chain(self.torque_specs.iter().map(|r| r.brand.as_str()))
            .chain(self.guides.iter().map(|r| r.brand.as_str()))
            .chain(self.suppliers.iter().map(|r| r.brand.as_str()));
        for brand in all {
            if !brands.contains(&brand) {
                brands.push(brand);
            }
        }
        brands
    }
}

/// Collection tag used by the type facet.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Issue,
    Torque,
    Guide,
    Supplier,
}

impl RecordType {
    /// Every type, in the order collections are scored.
    pub const ALL: [RecordType; 4] = [
        RecordType::Issue,
        RecordType::Torque,
        RecordType::Guide,
        RecordType::Supplier,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::Issue => "issue",
            RecordType::Torque => "torque",
            RecordType::Guide => "guide",
            RecordType::Supplier => "supplier",
        }
    }

    /// JSON key of the collection holding this type.
    pub fn collection(self) -> &'static str {
        match self {
            RecordType::Issue => "issues",
            RecordType::Torque => "torqueSpecs",
            RecordType::Guide => "guides",
            RecordType::Supplier => "suppliers",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "issue" => Ok(RecordType::Issue),
            "torque" => Ok(RecordType::Torque),
            "guide" => Ok(RecordType::Guide),
            "supplier" => Ok(RecordType::Supplier),
            other => Err(SearchError::UnknownRecordType(other.to_string())),
        }
    }
}

/// An owned record from any collection.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum IndexedRecord {
    Issue(IssueRecord),
    Torque(TorqueSpecRecord),
    Guide(GuideRecord),
    Supplier(SupplierRecord),
}

macro_rules! common_field {
    ($self:ident, $field:ident) => {
        match $self {
            IndexedRecord::Issue(r) => r.$field.as_str(),
            IndexedRecord::Torque(r) => r.$field.as_str(),
            IndexedRecord::Guide(r) => r.$field.as_str(),
            IndexedRecord::Supplier(r) => r.$field.as_str(),
        }
    };
}

impl IndexedRecord {
    pub fn record_type(&self) -> RecordType {
        match self {
            IndexedRecord::Issue(_) => RecordType::Issue,
            IndexedRecord::Torque(_) => RecordType::Torque,
            IndexedRecord::Guide(_) => RecordType::Guide,
            IndexedRecord::Supplier(_) => RecordType::Supplier,
        }
    }

    pub fn id(&self) -> &str {
        common_field!(self, id)
    }

    pub fn brand(&self) -> &str {
        common_field!(self, brand)
    }

    pub fn model(&self) -> &str {
        common_field!(self, model)
    }

    pub fn model_name(&self) -> &str {
        common_field!(self, model_name)
    }

    pub fn years(&self) -> &str {
        common_field!(self, years)
    }

    pub fn url(&self) -> &str {
        common_field!(self, url)
    }

    pub fn keywords(&self) -> &str {
        common_field!(self, keywords)
    }

    /// The title-like field: issue/guide title, torque component, supplier name.
    pub fn label(&self) -> &str {
        match self {
            IndexedRecord::Issue(r) => &r.title,
            IndexedRecord::Torque(r) => &r.component,
            IndexedRecord::Guide(r) => &r.title,
            IndexedRecord::Supplier(r) => &r.name,
        }
    }

    /// Deep link to the record on its vehicle page.
    pub fn anchor(&self) -> String {
        format!("{}#{}", self.url(), self.id())
    }
}

/// A scored search result.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SearchHit {
    pub record: IndexedRecord,
    pub score: f64,
    #[serde(rename = "type")]
    pub record_type: RecordType,
}
