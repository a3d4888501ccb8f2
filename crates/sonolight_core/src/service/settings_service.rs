//! Settings use-case service.
//!
//! `settings.json` holds one record. An empty collection reads as default
//! settings. Extra records after the first are never interpreted, but a
//! save keeps them after the rewritten settings record.

use super::record_service::ServiceResult;
use crate::model::Settings;
use crate::repo::RepoError;
use crate::store::{Collection, RecordStore, SaveOutcome, StoreError};
use log::{info, warn};
use serde_json::Value;

pub struct SettingsService<'store> {
    store: &'store RecordStore,
}

impl<'store> SettingsService<'store> {
    pub fn new(store: &'store RecordStore) -> Self {
        Self { store }
    }

    /// Loads settings, falling back to defaults for an empty collection.
    pub fn load(&self) -> ServiceResult<Settings> {
        let mut records = self.store.load(Collection::Settings).map_err(RepoError::from)?;
        if records.is_empty() {
            return Ok(Settings::default());
        }
        if records.len() > 1 {
            warn!(
                "event=settings_load module=service status=extra_records count={}",
                records.len()
            );
        }

        let record = records.swap_remove(0);
        let settings = serde_json::from_value(Value::Object(record)).map_err(|err| {
            RepoError::InvalidData {
                collection: Collection::Settings,
                index: 0,
                message: err.to_string(),
            }
        })?;
        Ok(settings)
    }

    /// Persists `settings` as the first settings record.
    ///
    /// An unreadable settings file fails the save instead of being replaced.
    pub fn save(&self, settings: &Settings) -> ServiceResult<SaveOutcome> {
        let record = match serde_json::to_value(settings) {
            Ok(Value::Object(record)) => record,
            Ok(_) => {
                return Err(RepoError::InvalidData {
                    collection: Collection::Settings,
                    index: 0,
                    message: "settings did not serialize to a JSON object".to_string(),
                }
                .into())
            }
            Err(source) => {
                return Err(RepoError::Store(StoreError::Encode {
                    collection: Collection::Settings,
                    source,
                })
                .into())
            }
        };

        let existing = self.store.load(Collection::Settings).map_err(RepoError::from)?;
        let kept = existing.len().saturating_sub(1);
        let mut records = Vec::with_capacity(kept + 1);
        records.push(record);
        records.extend(existing.into_iter().skip(1));

        let outcome = self
            .store
            .save(Collection::Settings, &records)
            .map_err(RepoError::from)?;
        info!(
            "event=settings_save module=service status=ok extra_records={}",
            kept
        );
        Ok(outcome)
    }
}
