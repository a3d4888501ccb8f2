//! Quote (devis) records.

use super::common::{require_id, require_text, RecordId, ValidationError};
use super::{timestamp, Entity};
use crate::store::Collection;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Refused,
    /// Deposit received.
    Validated,
    /// Fully paid.
    Finalized,
}

/// Catalog collection a quote line was picked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemKind {
    Product,
    #[default]
    Service,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentKind {
    /// Deposit.
    Acompte,
    /// Balance.
    Solde,
}

fn default_qty() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLine {
    #[serde(default)]
    pub item_id: Option<RecordId>,
    #[serde(default)]
    pub item_type: LineItemKind,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_qty")]
    pub qty: f64,
    #[serde(default)]
    pub unit_price_ttc_cent: i64,
    /// Discount percentage, 0..=100.
    #[serde(default)]
    pub remise_pct: f64,
    /// Snapshot written by the editor.
    #[serde(default)]
    pub total_line_ttc_cent: i64,
}

impl QuoteLine {
    pub fn new(label: impl Into<String>, qty: f64, unit_price_ttc_cent: i64) -> Self {
        Self {
            item_id: None,
            item_type: LineItemKind::default(),
            label: label.into(),
            description: None,
            qty,
            unit_price_ttc_cent,
            remise_pct: 0.0,
            total_line_ttc_cent: 0,
        }
    }

    fn validate(&self, line: usize) -> Result<(), ValidationError> {
        if self.label.trim().is_empty() {
            return Err(ValidationError::LineLabelMissing { line });
        }
        if !self.qty.is_finite() {
            return Err(ValidationError::NonFiniteQuantity { line });
        }
        if !(0.0..=100.0).contains(&self.remise_pct) {
            return Err(ValidationError::DiscountOutOfRange {
                line,
                value: self.remise_pct,
            });
        }
        Ok(())
    }
}

/// Payment received against a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub kind: PaymentKind,
    pub amount_cent: i64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(with = "timestamp::utc", default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub invoice_id: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: RecordId,
    #[serde(default)]
    pub number: Option<String>,
    pub client_id: RecordId,
    #[serde(default)]
    pub status: QuoteStatus,
    #[serde(with = "timestamp::utc", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::utc_opt", default)]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::utc_opt", default)]
    pub decided_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub lines: Vec<QuoteLine>,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
    #[serde(default)]
    pub total_ttc_cent: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Quote {
    /// Creates an empty draft quote for `client_id`.
    pub fn new(client_id: RecordId) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: None,
            client_id,
            status: QuoteStatus::default(),
            created_at: Utc::now(),
            sent_at: None,
            decided_at: None,
            event_date: None,
            lines: Vec::new(),
            payments: Vec::new(),
            total_ttc_cent: 0,
            notes: None,
            extra: Map::new(),
        }
    }
}

impl Entity for Quote {
    const COLLECTION: Collection = Collection::Quotes;

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_id("id", self.id)?;
        require_id("client_id", self.client_id)?;
        if let Some(number) = &self.number {
            require_text("number", number)?;
        }
        for (line, item) in self.lines.iter().enumerate() {
            item.validate(line)?;
        }
        Ok(())
    }
}
