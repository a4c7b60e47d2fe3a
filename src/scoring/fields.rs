// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-type field tables.
//!
//! Every record type answers the same questions for the scorer: what is your
//! title-like field, what is your secondary descriptive field, do you have a
//! category worth its own tier, what counts as your description, and which
//! fields make up the catch-all haystack. The answers are static tables, one
//! per [`RecordType`]. Adding a content type means adding a table and a
//! [`Searchable`] impl; the scoring loop doesn't change.
//!
//! | Type     | Primary   | Secondary | Category | Description |
//! |----------|-----------|-----------|----------|-------------|
//! | issue    | title     | symptoms  | -        | description |
//! | torque   | component | spec      | category | notes       |
//! | guide    | title     | -         | -        | description |
//! | supplier | name      | -         | -        | notes       |
//!
//! Model, keywords and brand tiers read the same fields on every type.

use crate::types::{
    GuideRecord, IndexedRecord, IssueRecord, RecordType, SupplierRecord, TorqueSpecRecord,
};

/// A named field on some indexed record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Brand,
    Model,
    ModelName,
    Years,
    Keywords,
    Title,
    Symptoms,
    Description,
    Component,
    Spec,
    Notes,
    Category,
    Difficulty,
    Time,
    GuideType,
    Name,
}

/// Which fields back the type-specific tiers.
#[derive(Clone, Copy, Debug)]
pub struct FieldMap {
    pub primary: Field,
    pub secondary: Option<Field>,
    pub category: Option<Field>,
    pub description: Option<Field>,
    /// Fields joined for the catch-all tier, in join order.
    pub searchable: &'static [Field],
}

pub const ISSUE_FIELDS: FieldMap = FieldMap {
    primary: Field::Title,
    secondary: Some(Field::Symptoms),
    category: None,
    description: Some(Field::Description),
    searchable: &[
        Field::Brand,
        Field::Model,
        Field::ModelName,
        Field::Years,
        Field::Title,
        Field::Symptoms,
        Field::Description,
        Field::Keywords,
    ],
};

pub const TORQUE_FIELDS: FieldMap = FieldMap {
    primary: Field::Component,
    secondary: Some(Field::Spec),
    category: Some(Field::Category),
    description: Some(Field::Notes),
    searchable: &[
        Field::Brand,
        Field::Model,
        Field::ModelName,
        Field::Years,
        Field::Category,
        Field::Component,
        Field::Spec,
        Field::Notes,
        Field::Keywords,
    ],
};

pub const GUIDE_FIELDS: FieldMap = FieldMap {
    primary: Field::Title,
    secondary: None,
    category: None,
    description: Some(Field::Description),
    searchable: &[
        Field::Brand,
        Field::Model,
        Field::ModelName,
        Field::Years,
        Field::Title,
        Field::Description,
        Field::Difficulty,
        Field::Time,
        Field::GuideType,
        Field::Keywords,
    ],
};

pub const SUPPLIER_FIELDS: FieldMap = FieldMap {
    primary: Field::Name,
    secondary: None,
    category: None,
    description: Some(Field::Notes),
    searchable: &[
        Field::Brand,
        Field::Model,
        Field::ModelName,
        Field::Years,
        Field::Name,
        Field::Category,
        Field::Notes,
        Field::Keywords,
    ],
};

impl RecordType {
    /// The field table for this type.
    pub fn field_map(self) -> &'static FieldMap {
        match self {
            RecordType::Issue => &ISSUE_FIELDS,
            RecordType::Torque => &TORQUE_FIELDS,
            RecordType::Guide => &GUIDE_FIELDS,
            RecordType::Supplier => &SUPPLIER_FIELDS,
        }
    }
}

/// A record the scorer can read fields from.
pub trait Searchable {
    fn record_type(&self) -> RecordType;

    /// Value of `field`, or `None` if this type doesn't have it.
    fn field(&self, field: Field) -> Option<&str>;
}

/// Fields every record type shares.
macro_rules! common_fields {
    ($record:expr, $field:expr) => {
        match $field {
            Field::Brand => return Some(&$record.brand),
            Field::Model => return Some(&$record.model),
            Field::ModelName => return Some(&$record.model_name),
            Field::Years => return Some(&$record.years),
            Field::Keywords => return Some(&$record.keywords),
            _ => {}
        }
    };
}

impl Searchable for IssueRecord {
    fn record_type(&self) -> RecordType {
        RecordType::Issue
    }

    fn field(&self, field: Field) -> Option<&str> {
        common_fields!(self, field);
        match field {
            Field::Title => Some(&self.title),
            Field::Symptoms => Some(&self.symptoms),
            Field::Description => Some(&self.description),
            _ => None,
        }
    }
}

impl Searchable for TorqueSpecRecord {
    fn record_type(&self) -> RecordType {
        RecordType::Torque
    }

    fn field(&self, field: Field) -> Option<&str> {
        common_fields!(self, field);
        match field {
            Field::Category => Some(&self.category),
            Field::Component => Some(&self.component),
            Field::Spec => Some(&self.spec),
            Field::Notes => Some(&self.notes),
            _ => None,
        }
    }
}

impl Searchable for GuideRecord {
    fn record_type(&self) -> RecordType {
        RecordType::Guide
    }

    fn field(&self, field: Field) -> Option<&str> {
        common_fields!(self, field);
        match field {
            Field::Title => Some(&self.title),
            Field::Description => Some(&self.description),
            Field::Difficulty => Some(&self.difficulty),
            Field::Time => Some(&self.time),
            Field::GuideType => Some(self.kind.as_str()),
            _ => None,
        }
    }
}

impl Searchable for SupplierRecord {
    fn record_type(&self) -> RecordType {
        RecordType::Supplier
    }

    fn field(&self, field: Field) -> Option<&str> {
        common_fields!(self, field);
        match field {
            Field::Name => Some(&self.name),
            Field::Category => Some(&self.category),
            Field::Notes => Some(&self.notes),
            _ => None,
        }
    }
}

impl Searchable for IndexedRecord {
    fn record_type(&self) -> RecordType {
        IndexedRecord::record_type(self)
    }

    fn field(&self, field: Field) -> Option<&str> {
        match self {
            IndexedRecord::Issue(r) => r.field(field),
            IndexedRecord::Torque(r) => r.field(field),
            IndexedRecord::Guide(r) => r.field(field),
            IndexedRecord::Supplier(r) => r.field(field),
        }
    }
}
