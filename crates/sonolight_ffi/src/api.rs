//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the tabbed window's data operations to Dart via FRB.
//! - Translate core errors into plain response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Records cross the boundary as JSON object strings, one per record.
//! - The data directory is fixed for the process once first resolved.

use log::{info, warn};
use serde_json::Value;
use sonolight_core::config::ENV_DATA_DIR;
use sonolight_core::service::ClientService;
use sonolight_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppConfig, Client, Collection, JsonRepository, LogLevel, Record, RecordStore, SaveOutcome,
    Tab,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const DEFAULT_DATA_DIR: &str = "data";
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = match LogLevel::parse(&level) {
        Ok(level) => level,
        Err(err) => return err.to_string(),
    };
    match init_logging_inner(level, std::path::Path::new(log_dir.trim())) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the data directory used by every later call.
///
/// # FFI contract
/// - Must run before the first data call to take effect.
/// - Repeating the same directory is a no-op; a different one is rejected.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_data_dir(data_dir: String) -> String {
    let trimmed = data_dir.trim();
    if trimmed.is_empty() {
        return "data_dir must not be empty".to_string();
    }

    let wanted = PathBuf::from(trimmed);
    let active = DATA_DIR.get_or_init(|| wanted.clone());
    if *active != wanted {
        return format!(
            "data directory already set to `{}`; refusing to switch to `{}`",
            active.display(),
            wanted.display()
        );
    }
    String::new()
}

/// One tab of the main window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabItem {
    /// Collection key accepted by `collection_load` / `collection_save`.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Backing file name inside the data directory.
    pub file_name: String,
}

/// Records of one collection, as JSON object strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionLoadResponse {
    pub ok: bool,
    pub records: Vec<String>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Id of the created record, when the action creates one.
    pub record_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, record_id: Option<String>) -> Self {
        Self {
            ok: true,
            record_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record_id: None,
            message: message.into(),
        }
    }
}

/// Health of one collection file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataCheckItem {
    pub key: String,
    /// `ok`, `missing` or `error`.
    pub status: String,
    pub record_count: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataCheckResponse {
    /// False when any collection failed to load.
    pub ok: bool,
    pub data_dir: String,
    pub items: Vec<DataCheckItem>,
}

/// Lists the tabs of the main window in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn tab_list() -> Vec<TabItem> {
    Tab::all().into_iter().map(to_tab_item).collect()
}

/// Loads every record of `collection`.
///
/// # FFI contract
/// - Sync call, file-backed execution.
/// - Never panics; failures come back with `ok=false` and no records.
#[flutter_rust_bridge::frb(sync)]
pub fn collection_load(collection: String) -> CollectionLoadResponse {
    let loaded = parse_collection(&collection).and_then(|collection| {
        let records = open_store()?
            .load(collection)
            .map_err(|err| err.to_string())?;
        records
            .into_iter()
            .map(|record| serde_json::to_string(&record).map_err(|err| err.to_string()))
            .collect::<Result<Vec<_>, _>>()
    });

    match loaded {
        Ok(records) => CollectionLoadResponse {
            ok: true,
            message: format!("Loaded {} record(s).", records.len()),
            records,
        },
        Err(err) => CollectionLoadResponse {
            ok: false,
            records: Vec::new(),
            message: format!("collection_load failed: {err}"),
        },
    }
}

/// Replaces the whole content of `collection` with `records`.
///
/// Each entry of `records` must be one JSON object. Nothing is written
/// when any entry fails to parse.
///
/// # FFI contract
/// - Sync call, file-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn collection_save(collection: String, records: Vec<String>) -> ActionResponse {
    let saved = parse_collection(&collection).and_then(|collection| {
        let records = parse_records(&records)?;
        let outcome = open_store()?
            .save(collection, &records)
            .map_err(|err| err.to_string())?;
        Ok((records.len(), outcome))
    });

    match saved {
        Ok((count, SaveOutcome::Unchanged)) => {
            ActionResponse::success(format!("No changes ({count} record(s))."), None)
        }
        Ok((count, SaveOutcome::Written { .. })) => {
            info!(
                "event=collection_save module=ffi status=ok collection={} records={}",
                collection.trim(),
                count
            );
            ActionResponse::success(format!("Saved {count} record(s)."), None)
        }
        Err(err) => ActionResponse::failure(format!("collection_save failed: {err}")),
    }
}

/// Creates a client from the quick-add form.
///
/// # FFI contract
/// - Sync call, file-backed execution.
/// - Never panics.
/// - Returns the created client id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn client_create(name: String, email: Option<String>, phone: Option<String>) -> ActionResponse {
    let mut client = Client::new(name.trim());
    client.email = non_blank(email);
    client.phone = non_blank(phone);

    let created = open_store().and_then(|store| {
        ClientService::new(JsonRepository::new(&store))
            .add(&client)
            .map_err(|err| err.to_string())
    });

    match created {
        Ok(id) => ActionResponse::success("Client created.", Some(id.to_string())),
        Err(err) => ActionResponse::failure(format!("client_create failed: {err}")),
    }
}

/// Loads every collection once and reports its state.
///
/// # FFI contract
/// - Sync call, read-only.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn data_check() -> DataCheckResponse {
    let data_dir = resolve_data_dir();
    let store = match open_store() {
        Ok(store) => store,
        Err(err) => {
            return DataCheckResponse {
                ok: false,
                data_dir: data_dir.display().to_string(),
                items: Vec::new(),
            }
            .with_failure(err)
        }
    };

    let items = Collection::ALL
        .into_iter()
        .map(|collection| check_collection(&store, collection))
        .collect::<Vec<_>>();
    let ok = items.iter().all(|item| item.status != "error");
    if !ok {
        warn!("event=data_check module=ffi status=error");
    }

    DataCheckResponse {
        ok,
        data_dir: data_dir.display().to_string(),
        items,
    }
}

impl DataCheckResponse {
    fn with_failure(mut self, message: String) -> Self {
        self.items.push(DataCheckItem {
            key: String::new(),
            status: "error".to_string(),
            record_count: 0,
            message,
        });
        self
    }
}

fn check_collection(store: &RecordStore, collection: Collection) -> DataCheckItem {
    let key = collection.name().to_string();
    if !store.exists(collection) {
        return DataCheckItem {
            key,
            status: "missing".to_string(),
            record_count: 0,
            message: format!("{} not found", collection.file_name()),
        };
    }

    match store.load(collection) {
        Ok(records) => DataCheckItem {
            key,
            status: "ok".to_string(),
            record_count: u32::try_from(records.len()).unwrap_or(u32::MAX),
            message: String::new(),
        },
        Err(err) => DataCheckItem {
            key,
            status: "error".to_string(),
            record_count: 0,
            message: err.to_string(),
        },
    }
}

fn resolve_data_dir() -> PathBuf {
    DATA_DIR
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(ENV_DATA_DIR) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            PathBuf::from(DEFAULT_DATA_DIR)
        })
        .clone()
}

fn open_store() -> Result<RecordStore, String> {
    let mut config = AppConfig::from_env().map_err(|err| err.to_string())?;
    config.data_dir = resolve_data_dir();
    Ok(RecordStore::from_config(&config))
}

fn parse_collection(raw: &str) -> Result<Collection, String> {
    Collection::parse(raw).ok_or_else(|| format!("unknown collection `{}`", raw.trim()))
}

fn parse_records(raw: &[String]) -> Result<Vec<Record>, String> {
    raw.iter()
        .enumerate()
        .map(|(index, text)| match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(record)) => Ok(record),
            Ok(_) => Err(format!("record {index} is not a JSON object")),
            Err(err) => Err(format!("record {index} is not valid JSON: {err}")),
        })
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn to_tab_item(tab: Tab) -> TabItem {
    TabItem {
        key: tab.collection.name().to_string(),
        label: tab.label.to_string(),
        file_name: tab.collection.file_name().to_string(),
    }
}
