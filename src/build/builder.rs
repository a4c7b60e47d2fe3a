// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Flattening vehicle records into the four search collections.
//!
//! This is a pure function of its input: same vehicles in, same bytes out.
//! Ids are derived from the model code plus something stable about the
//! sub-item (its own id, or a slug of its name), so anchor links like
//! `/resources/bmw/e30/#e30-rust-1` survive rebuilds.

use std::collections::{HashMap, HashSet};

use crate::contracts::{check_ids_unique, check_url_invariant};
use crate::error::BuildError;
use crate::types::{
    GuideKind, GuideRecord, IssueRecord, SearchIndex, SupplierRecord, TorqueSpecRecord,
};
use crate::utils::slugify;

use super::document::{LoadedVehicle, VehicleRecord};
use super::keywords::{guide_keywords, issue_keywords, supplier_keywords, torque_keywords};

/// Identity fields shared by every record derived from one vehicle.
struct VehicleIdentity<'a> {
    brand: &'a str,
    model: &'a str,
    model_key: String,
    model_name: String,
    years: &'a str,
    url: String,
}

impl<'a> VehicleIdentity<'a> {
    fn derive(origin: &str, vehicle: &'a VehicleRecord) -> Result<Self, BuildError> {
        let missing = |field| BuildError::MissingField {
            origin: origin.to_string(),
            field,
        };
        if vehicle.brand.trim().is_empty() {
            return Err(missing("brand"));
        }
        if vehicle.model.trim().is_empty() {
            return Err(missing("model"));
        }
        if vehicle.full_name.trim().is_empty() {
            return Err(missing("fullName"));
        }

        Ok(Self {
            brand: &vehicle.brand,
            model: &vehicle.model,
            model_key: vehicle.model.to_lowercase(),
            model_name: model_name(&vehicle.brand, &vehicle.full_name),
            years: &vehicle.years,
            url: vehicle_url(&vehicle.brand, &vehicle.model),
        })
    }
}

/// `fullName` without its leading brand: "BMW E30 3-Series" → "E30 3-Series".
pub fn model_name(brand: &str, full_name: &str) -> String {
    full_name
        .strip_prefix(brand)
        .and_then(|rest| rest.strip_prefix(' '))
        .unwrap_or(full_name)
        .to_string()
}

/// Vehicle page url: `/resources/<brand>/<model>/`, lowercased.
pub fn vehicle_url(brand: &str, model: &str) -> String {
    format!(
        "/resources/{}/{}/",
        brand.to_lowercase(),
        model.to_lowercase()
    )
}

/// What a model code stands for. Every vehicle sharing a code must agree on it.
#[derive(PartialEq)]
struct ModelIdentity {
    brand: String,
    model: String,
    model_name: String,
    years: String,
    url: String,
}

impl ModelIdentity {
    fn of(ident: &VehicleIdentity<'_>) -> Self {
        Self {
            brand: ident.brand.to_string(),
            model: ident.model.to_string(),
            model_name: ident.model_name.clone(),
            years: ident.years.to_string(),
            url: ident.url.clone(),
        }
    }

    fn describe(&self) -> String {
        format!(
            "{} {}: {} ({}) at {}",
            self.brand, self.model, self.model_name, self.years, self.url
        )
    }
}

/// Tracks ids per collection so a collision fails the build.
#[derive(Default)]
struct IdRegistry {
    seen: HashSet<String>,
}

impl IdRegistry {
    fn claim(&mut self, collection: &'static str, id: String) -> Result<String, BuildError> {
        if !self.seen.insert(id.clone()) {
            return Err(BuildError::DuplicateId { collection, id });
        }
        Ok(id)
    }
}

#[derive(Default)]
struct IndexAccumulator {
    index: SearchIndex,
    models: HashMap<String, ModelIdentity>,
    issue_ids: IdRegistry,
    torque_ids: IdRegistry,
    guide_ids: IdRegistry,
    supplier_ids: IdRegistry,
}

impl IndexAccumulator {
    fn add_vehicle(&mut self, origin: &str, vehicle: &VehicleRecord) -> Result<(), BuildError> {
        let ident = VehicleIdentity::derive(origin, vehicle)?;
        self.claim_model(&ident)?;

        for issue in &vehicle.issues {
            let id = self
                .issue_ids
                .claim("issues", format!("{}-{}", ident.model_key, issue.id))?;
            self.index.issues.push(IssueRecord {
                id,
                brand: ident.brand.to_string(),
                model: ident.model.to_string(),
                model_name: ident.model_name.clone(),
                years: ident.years.to_string(),
                title: issue.title.clone(),
                symptoms: issue.symptoms.clone(),
                description: issue.description.clone(),
                keywords: issue_keywords(&issue.title, &issue.symptoms, &issue.description),
                url: ident.url.clone(),
            });
        }

        for (category, specs) in &vehicle.torque_specs {
            for spec in specs.entries() {
                let notes = spec.notes.clone().unwrap_or_default();
                let id = self.torque_ids.claim(
                    "torqueSpecs",
                    format!("{}-{}-{}", ident.model_key, category, slugify(&spec.component)),
                )?;
                self.index.torque_specs.push(TorqueSpecRecord {
                    id,
                    brand: ident.brand.to_string(),
                    model: ident.model.to_string(),
                    model_name: ident.model_name.clone(),
                    years: ident.years.to_string(),
                    category: category.clone(),
                    component: spec.component.clone(),
                    spec: spec.spec.clone(),
                    keywords: torque_keywords(&spec.component, category, &notes),
                    notes,
                    url: ident.url.clone(),
                });
            }
        }

        let tagged = vehicle
            .guides
            .iter()
            .map(|g| (g, GuideKind::Restoration))
            .chain(vehicle.diy_guides.iter().map(|g| (g, GuideKind::Diy)));
        for (guide, kind) in tagged {
            let id = self
                .guide_ids
                .claim("guides", format!("{}-{}", ident.model_key, guide.id))?;
            self.index.guides.push(GuideRecord {
                id,
                brand: ident.brand.to_string(),
                model: ident.model.to_string(),
                model_name: ident.model_name.clone(),
                years: ident.years.to_string(),
                title: guide.title.clone(),
                description: guide.description.clone(),
                difficulty: guide.difficulty.clone(),
                time: guide.time.clone(),
                kind,
                keywords: guide_keywords(&guide.title, &guide.description, &guide.difficulty, kind),
                url: ident.url.clone(),
            });
        }

        for (category, suppliers) in &vehicle.suppliers {
            for supplier in suppliers.entries() {
                let notes = supplier.notes.clone().unwrap_or_default();
                let id = self.supplier_ids.claim(
                    "suppliers",
                    format!("{}-{}-{}", ident.model_key, category, slugify(&supplier.name)),
                )?;
                self.index.suppliers.push(SupplierRecord {
                    id,
                    brand: ident.brand.to_string(),
                    model: ident.model.to_string(),
                    model_name: ident.model_name.clone(),
                    years: ident.years.to_string(),
                    name: supplier.name.clone(),
                    category: category.clone(),
                    keywords: supplier_keywords(&supplier.name, category, &notes),
                    notes,
                    url: ident.url.clone(),
                });
            }
        }

        Ok(())
    }

    /// Ids are prefixed with the lowercased model code, so a code may repeat
    /// only when brand, model, name, years and page all agree.
    fn claim_model(&mut self, ident: &VehicleIdentity<'_>) -> Result<(), BuildError> {
        let claimed = ModelIdentity::of(ident);
        match self.models.get(&ident.model_key) {
            Some(first) if *first != claimed => Err(BuildError::ConflictingModel {
                model: ident.model.to_string(),
                first: first.describe(),
                second: claimed.describe(),
            }),
            Some(_) => Ok(()),
            None => {
                self.models.insert(ident.model_key.clone(), claimed);
                Ok(())
            }
        }
    }

    fn finish(self) -> SearchIndex {
        check_ids_unique(&self.index);
        check_url_invariant(&self.index);
        self.index
    }
}

/// Build the search index from vehicle records, in input order.
///
/// Fails on the first record missing `brand`, `model` or `fullName`, and on
/// any id collision. Nothing partial is returned.
pub fn build_index(vehicles: &[VehicleRecord]) -> Result<SearchIndex, BuildError> {
    let mut acc = IndexAccumulator::default();
    for (position, vehicle) in vehicles.iter().enumerate() {
        let origin = if vehicle.model.trim().is_empty() {
            format!("vehicle #{}", position)
        } else {
            vehicle.model.clone()
        };
        acc.add_vehicle(&origin, vehicle)?;
    }
    Ok(acc.finish())
}

/// Same as [`build_index`], but errors name the source file.
pub fn build_index_from_loaded(vehicles: &[LoadedVehicle]) -> Result<SearchIndex, BuildError> {
    let mut acc = IndexAccumulator::default();
    for loaded in vehicles {
        acc.add_vehicle(&loaded.origin, &loaded.record)?;
    }
    Ok(acc.finish())
}
