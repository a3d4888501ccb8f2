//! Catalog items: rentable products and billable services.

use super::common::{require_id, require_text, RecordId, ValidationError};
use super::Entity;
use crate::store::Collection;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

fn default_product_unit() -> String {
    "unité".to_string()
}

fn default_service_unit() -> String {
    "prestation".to_string()
}

fn default_service_kind() -> String {
    "service".to_string()
}

fn default_true() -> bool {
    true
}

/// Equipment item (speakers, lights, ...) priced per unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    #[serde(rename = "ref")]
    pub reference: String,
    pub label: String,
    #[serde(default)]
    pub price_ttc_cent: i64,
    #[serde(default = "default_product_unit")]
    pub unit: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(reference: impl Into<String>, label: impl Into<String>, price_ttc_cent: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            reference: reference.into(),
            label: label.into(),
            price_ttc_cent,
            unit: default_product_unit(),
            active: true,
            description: None,
            extra: Map::new(),
        }
    }
}

impl Entity for Product {
    const COLLECTION: Collection = Collection::Products;

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_id("id", self.id)?;
        require_text("ref", &self.reference)?;
        require_text("label", &self.label)
    }
}

/// Performance or labour item (DJ set, lighting operator, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: RecordId,
    #[serde(rename = "type", default = "default_service_kind")]
    pub kind: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_ttc_cent: i64,
    #[serde(default = "default_service_unit")]
    pub unit: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Service {
    pub fn new(reference: impl Into<String>, label: impl Into<String>, price_ttc_cent: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: default_service_kind(),
            reference: reference.into(),
            label: label.into(),
            description: None,
            price_ttc_cent,
            unit: default_service_unit(),
            active: true,
            extra: Map::new(),
        }
    }
}

impl Entity for Service {
    const COLLECTION: Collection = Collection::Services;

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_id("id", self.id)?;
        require_text("ref", &self.reference)?;
        require_text("label", &self.label)
    }
}
