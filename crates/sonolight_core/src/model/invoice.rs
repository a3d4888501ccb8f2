//! Invoice (facture) records.

use super::common::{require_id, RecordId, ValidationError};
use super::{timestamp, Entity};
use crate::store::Collection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceType {
    /// Deposit invoice.
    #[default]
    Acompte,
    /// Balance invoice.
    Solde,
    /// Closing recap invoice.
    Finale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Issued,
    Paid,
}

fn default_qty() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub label: String,
    #[serde(default = "default_qty")]
    pub qty: f64,
    #[serde(default)]
    pub unit_price_ttc_cent: i64,
    #[serde(default)]
    pub total_line_ttc_cent: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: RecordId,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: InvoiceType,
    #[serde(default)]
    pub status: InvoiceStatus,
    pub quote_id: RecordId,
    pub client_id: RecordId,
    #[serde(default)]
    pub lines: Vec<InvoiceLine>,
    #[serde(default)]
    pub total_ttc_cent: i64,
    #[serde(with = "timestamp::utc", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::utc_opt", default)]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::utc_opt", default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Invoice {
    pub fn new(kind: InvoiceType, quote_id: RecordId, client_id: RecordId) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: None,
            kind,
            status: InvoiceStatus::default(),
            quote_id,
            client_id,
            lines: Vec::new(),
            total_ttc_cent: 0,
            created_at: Utc::now(),
            issued_at: None,
            paid_at: None,
            notes: None,
            extra: Map::new(),
        }
    }
}

impl Entity for Invoice {
    const COLLECTION: Collection = Collection::Invoices;

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_id("id", self.id)?;
        require_id("quote_id", self.quote_id)?;
        require_id("client_id", self.client_id)?;
        for (line, item) in self.lines.iter().enumerate() {
            if item.label.trim().is_empty() {
                return Err(ValidationError::LineLabelMissing { line });
            }
            if !item.qty.is_finite() {
                return Err(ValidationError::NonFiniteQuantity { line });
            }
        }
        Ok(())
    }
}
