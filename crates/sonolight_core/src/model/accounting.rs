//! Accounting journal entries.

use super::common::{require_id, RecordId, ValidationError};
use super::{timestamp, Entity};
use crate::store::Collection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    Acompte,
    Solde,
    #[default]
    Vente,
}

/// One cash-in line of the journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingEntry {
    pub id: RecordId,
    #[serde(with = "timestamp::utc", default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub kind: EntryType,
    #[serde(default)]
    pub amount_cent: i64,
    /// Free text such as `CB`, `ESPECES`, `VIREMENT`, `CHEQUE`.
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub invoice_id: Option<RecordId>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AccountingEntry {
    pub fn new(kind: EntryType, amount_cent: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            kind,
            amount_cent,
            payment_method: None,
            invoice_id: None,
            label: None,
            extra: Map::new(),
        }
    }
}

impl Entity for AccountingEntry {
    const COLLECTION: Collection = Collection::AccountingEntries;

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_id("id", self.id)?;
        if let Some(invoice_id) = self.invoice_id {
            require_id("invoice_id", invoice_id)?;
        }
        Ok(())
    }
}
