//! JSON file storage for record collections.
//!
//! # Responsibility
//! - Map each collection to one JSON file under the data directory.
//! - Load a whole collection into memory and overwrite it whole on save.
//!
//! # Invariants
//! - A collection file holds a JSON array of objects; order is preserved.
//! - Saves replace the file atomically (temp file + fsync + rename).
//! - A malformed file is reported as an error and left untouched on disk.
//! - No schema, uniqueness or indexing rules apply at this layer.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod collection;
mod json_file;
mod record_store;

pub use collection::Collection;
pub use record_store::{record_id, Record, RecordStore, SaveOutcome, StoreOptions};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// The file exists but could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file content is not valid JSON.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The file is valid JSON but not an array.
    NotAnArray { path: PathBuf },
    /// An array element is not a JSON object.
    NotAnObject { path: PathBuf, index: usize },
    /// The file does not exist and the missing-file policy is `Error`.
    Missing { path: PathBuf },
    /// Records could not be rendered as JSON.
    Encode {
        collection: Collection,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error on `{}`: {source}", path.display()),
            Self::Malformed { path, source } => {
                write!(f, "malformed JSON in `{}`: {source}", path.display())
            }
            Self::NotAnArray { path } => {
                write!(f, "`{}` must contain a JSON array", path.display())
            }
            Self::NotAnObject { path, index } => write!(
                f,
                "`{}` element {index} is not a JSON object",
                path.display()
            ),
            Self::Missing { path } => write!(f, "collection file `{}` not found", path.display()),
            Self::Encode { collection, source } => {
                write!(f, "failed to encode {collection} records: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
            Self::NotAnArray { .. } | Self::NotAnObject { .. } | Self::Missing { .. } => None,
        }
    }
}

impl StoreError {
    /// Short stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Malformed { .. } => "malformed_json",
            Self::NotAnArray { .. } => "not_an_array",
            Self::NotAnObject { .. } => "not_an_object",
            Self::Missing { .. } => "missing_file",
            Self::Encode { .. } => "encode",
        }
    }
}
