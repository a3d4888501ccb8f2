//! Client records.

use super::common::{check_email, require_id, require_text, RecordId, ValidationError};
use super::Entity;
use crate::store::Collection;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub postal_code: String,
    pub city: String,
}

/// A customer of the business (private person or organiser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Client {
    /// Creates a client with a fresh id and no contact details.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            contact_name: None,
            email: None,
            phone: None,
            address: None,
            notes: None,
            extra: Map::new(),
        }
    }
}

impl Entity for Client {
    const COLLECTION: Collection = Collection::Clients;

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_id("id", self.id)?;
        require_text("name", &self.name)?;
        check_email(self.email.as_deref())
    }
}
