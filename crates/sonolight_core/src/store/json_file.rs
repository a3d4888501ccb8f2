//! Low-level file operations for collection documents.

use super::record_store::Record;
use super::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use log::warn;
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const BACKUP_SUFFIX: &str = ".bak.json";
const BACKUP_STAMP_FORMAT: &str = "%Y%m%d-%H%M%S-%3f";

/// Reads the raw file bytes; `Ok(None)` when it does not exist.
///
/// Encoding is checked by the JSON parser, so invalid UTF-8 surfaces as
/// `Malformed` rather than as an I/O error.
pub(super) fn read_bytes(path: &Path) -> StoreResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(io_error(path, source)),
    }
}

/// Parses a collection document.
///
/// A blank file reads as an empty collection. With `accept_bare_object`, a
/// top-level object reads as a one-record collection.
pub(super) fn parse_records(
    path: &Path,
    bytes: &[u8],
    accept_bare_object: bool,
) -> StoreResult<Vec<Record>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(record) => Ok(record),
                _ => Err(StoreError::NotAnObject {
                    path: path.to_path_buf(),
                    index,
                }),
            })
            .collect(),
        Value::Object(record) if accept_bare_object => Ok(vec![record]),
        _ => Err(StoreError::NotAnArray {
            path: path.to_path_buf(),
        }),
    }
}

/// Renders records as pretty JSON with two-space indentation.
pub(super) fn render_records(records: &[Record]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

/// Replaces `path` with `contents` through a synced temp file in the same
/// directory, so readers never observe a partial document.
pub(super) fn write_atomic(path: &Path, contents: &str) -> StoreResult<()> {
    let dir = parent_dir(path);
    fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".sonolight-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|source| io_error(dir, source))?;

    temp.write_all(contents.as_bytes())
        .map_err(|source| io_error(temp.path(), source))?;
    temp.as_file()
        .sync_all()
        .map_err(|source| io_error(temp.path(), source))?;
    temp.persist(path)
        .map_err(|err| io_error(path, err.error))?;

    Ok(())
}

/// Copies the current file to a sibling backup stamped in UTC, so names
/// keep sorting chronologically across local clock changes.
pub(super) fn write_backup(path: &Path, now: DateTime<Utc>) -> StoreResult<PathBuf> {
    let backup = backup_path(path, now);
    fs::copy(path, &backup).map_err(|source| io_error(&backup, source))?;
    Ok(backup)
}

/// Lists backups of `path`, oldest first.
pub(super) fn list_backups(path: &Path) -> StoreResult<Vec<PathBuf>> {
    let dir = parent_dir(path);
    let prefix = format!("{}.", file_stem(path));

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(io_error(dir, source)),
    };

    let mut backups = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| io_error(dir, source))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let is_backup = name
            .strip_prefix(prefix.as_str())
            .and_then(|rest| rest.strip_suffix(BACKUP_SUFFIX))
            .is_some_and(|stamp| !stamp.is_empty() && !stamp.contains('.'));
        if is_backup {
            backups.push(entry.path());
        }
    }
    backups.sort();
    Ok(backups)
}

/// Deletes the oldest backups beyond `keep`. Returns how many were removed.
///
/// A backup that cannot be removed is logged and skipped.
pub(super) fn rotate_backups(path: &Path, keep: usize) -> StoreResult<usize> {
    let backups = list_backups(path)?;
    if backups.len() <= keep {
        return Ok(0);
    }

    let mut removed = 0;
    for old in &backups[..backups.len() - keep] {
        match fs::remove_file(old) {
            Ok(()) => removed += 1,
            Err(err) => warn!(
                "event=backup_rotate module=store status=error file={} error={}",
                old.display(),
                err
            ),
        }
    }
    Ok(removed)
}

fn backup_path(path: &Path, now: DateTime<Utc>) -> PathBuf {
    let name = format!(
        "{}.{}{BACKUP_SUFFIX}",
        file_stem(path),
        now.format(BACKUP_STAMP_FORMAT)
    );
    parent_dir(path).join(name)
}

fn file_stem(path: &Path) -> &str {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("collection")
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}
