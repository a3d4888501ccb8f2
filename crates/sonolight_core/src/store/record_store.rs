//! Whole-file record store over the data directory.

use super::json_file;
use super::{Collection, StoreError, StoreResult};
use crate::config::{AppConfig, BackupPolicy, MissingFilePolicy};
use chrono::Utc;
use log::{debug, error, info, warn};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::Instant;
use uuid::Uuid;

/// One JSON object within a collection file.
pub type Record = Map<String, Value>;

/// Returns the parsed `id` field of a raw record, if it holds a UUID string.
pub fn record_id(record: &Record) -> Option<Uuid> {
    record
        .get("id")
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
}

/// Result of a save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The file was replaced. Carries the backup taken beforehand, if any.
    Written { backup: Option<PathBuf> },
    /// The rendered content matched the file; nothing was touched.
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreOptions {
    pub missing_files: MissingFilePolicy,
    pub backups: BackupPolicy,
}

/// JSON-backed store, one file per collection under `data_dir`.
#[derive(Debug, Clone)]
pub struct RecordStore {
    data_dir: PathBuf,
    options: StoreOptions,
}

impl RecordStore {
    /// Creates a store with default options (empty on missing, 5 backups).
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_options(data_dir, StoreOptions::default())
    }

    pub fn with_options(data_dir: impl Into<PathBuf>, options: StoreOptions) -> Self {
        Self {
            data_dir: data_dir.into(),
            options,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_options(
            config.data_dir.clone(),
            StoreOptions {
                missing_files: config.missing_files,
                backups: config.backups,
            },
        )
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    pub fn exists(&self, collection: Collection) -> bool {
        self.path_for(collection).is_file()
    }

    /// Loads every record of `collection`, in file order.
    ///
    /// # Errors
    /// - `Missing` when the file is absent and the policy is `Error`.
    /// - `Io`, `Malformed`, `NotAnArray`, `NotAnObject` for unreadable or
    ///   ill-shaped files.
    pub fn load(&self, collection: Collection) -> StoreResult<Vec<Record>> {
        let started_at = Instant::now();
        let path = self.path_for(collection);

        let result = match json_file::read_bytes(&path) {
            Ok(Some(bytes)) => {
                json_file::parse_records(&path, &bytes, collection == Collection::Settings)
            }
            Ok(None) => match self.options.missing_files {
                MissingFilePolicy::Empty => {
                    debug!(
                        "event=store_load module=store status=missing collection={} policy=empty",
                        collection
                    );
                    Ok(Vec::new())
                }
                MissingFilePolicy::Error => Err(StoreError::Missing { path: path.clone() }),
            },
            Err(err) => Err(err),
        };

        match &result {
            Ok(records) => info!(
                "event=store_load module=store status=ok collection={} records={} duration_ms={}",
                collection,
                records.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_load module=store status=error collection={} duration_ms={} error_code={} error={}",
                collection,
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }
        result
    }

    /// Replaces the whole file of `collection` with `records`.
    ///
    /// Skips the write when the rendered document equals the file content.
    /// Otherwise backs up the previous file (per policy) and writes
    /// atomically.
    pub fn save(&self, collection: Collection, records: &[Record]) -> StoreResult<SaveOutcome> {
        let started_at = Instant::now();
        let path = self.path_for(collection);

        let result = self.write_collection(collection, &path, records);

        match &result {
            Ok(SaveOutcome::Unchanged) => debug!(
                "event=store_save module=store status=unchanged collection={} records={}",
                collection,
                records.len()
            ),
            Ok(SaveOutcome::Written { backup }) => info!(
                "event=store_save module=store status=ok collection={} records={} backup={} duration_ms={}",
                collection,
                records.len(),
                backup.is_some(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_save module=store status=error collection={} duration_ms={} error_code={} error={}",
                collection,
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }
        result
    }

    /// Creates every missing collection file as an empty array.
    ///
    /// Returns the collections that were created.
    pub fn ensure_all(&self) -> StoreResult<Vec<Collection>> {
        let mut created = Vec::new();
        for collection in Collection::ALL {
            if self.exists(collection) {
                continue;
            }
            json_file::write_atomic(&self.path_for(collection), "[]")?;
            created.push(collection);
        }
        if !created.is_empty() {
            info!(
                "event=store_init module=store status=ok created={}",
                created.len()
            );
        }
        Ok(created)
    }

    /// Lists backups of `collection`, oldest first.
    pub fn backups(&self, collection: Collection) -> StoreResult<Vec<PathBuf>> {
        json_file::list_backups(&self.path_for(collection))
    }

    fn write_collection(
        &self,
        collection: Collection,
        path: &Path,
        records: &[Record],
    ) -> StoreResult<SaveOutcome> {
        let rendered = json_file::render_records(records)
            .map_err(|source| StoreError::Encode { collection, source })?;

        let current = match json_file::read_bytes(path) {
            Ok(current) => current,
            Err(err) => {
                // An unreadable file is still replaced; only the comparison is lost.
                warn!(
                    "event=store_save module=store status=compare_failed collection={} error={}",
                    collection, err
                );
                None
            }
        };
        if current.as_deref() == Some(rendered.as_bytes()) {
            return Ok(SaveOutcome::Unchanged);
        }

        let backups = self.options.backups;
        let backup = if backups.is_active() && path.is_file() {
            let backup = json_file::write_backup(path, Utc::now())?;
            json_file::rotate_backups(path, backups.keep)?;
            Some(backup)
        } else {
            None
        };

        json_file::write_atomic(path, &rendered)?;
        Ok(SaveOutcome::Written { backup })
    }
}
