//! Agenda events (gigs, setups, deliveries).

use super::common::{require_id, require_text, RecordId, ValidationError};
use super::Entity;
use crate::store::Collection;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// All-day agenda entry, optionally spanning several days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: RecordId,
    pub title: String,
    pub date: NaiveDate,
    /// Last day of a multi-day event. Must not precede `date`.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub client_id: Option<RecordId>,
    #[serde(default)]
    pub quote_id: Option<RecordId>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            date,
            end_date: None,
            client_id: None,
            quote_id: None,
            location: None,
            notes: None,
            extra: Map::new(),
        }
    }

    /// Last day covered by the event.
    pub fn last_day(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.date)
    }
}

impl Entity for Event {
    const COLLECTION: Collection = Collection::Events;

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_id("id", self.id)?;
        require_text("title", &self.title)?;
        if let Some(end_date) = self.end_date {
            if end_date < self.date {
                return Err(ValidationError::EventEndsBeforeStart {
                    date: self.date.to_string(),
                    end_date: end_date.to_string(),
                });
            }
        }
        Ok(())
    }
}
