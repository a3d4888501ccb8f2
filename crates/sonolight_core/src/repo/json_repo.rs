//! Repository contract and its JSON-file implementation.

use crate::model::{Entity, RecordId, ValidationError};
use crate::store::{record_id, Collection, Record, RecordStore, StoreError};
use log::warn;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Store(StoreError),
    NotFound {
        collection: Collection,
        id: RecordId,
    },
    Duplicate {
        collection: Collection,
        id: RecordId,
    },
    /// A persisted record does not decode or validate as its entity type.
    InvalidData {
        collection: Collection,
        index: usize,
        message: String,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
            Self::Duplicate { collection, id } => {
                write!(f, "{collection} record already exists: {id}")
            }
            Self::InvalidData {
                collection,
                index,
                message,
            } => write!(f, "invalid {collection} record at index {index}: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound { .. } | Self::Duplicate { .. } | Self::InvalidData { .. } => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Records that decoded, plus the count of skipped invalid ones.
#[derive(Debug, Clone, PartialEq)]
pub struct LenientList<T> {
    pub items: Vec<T>,
    pub skipped: usize,
}

/// Repository interface for one entity collection.
pub trait Repository<T: Entity> {
    /// Lists every record; fails on the first invalid one.
    fn list(&self) -> RepoResult<Vec<T>>;
    /// Lists valid records, skipping invalid ones.
    fn list_lenient(&self) -> RepoResult<LenientList<T>>;
    fn get(&self, id: RecordId) -> RepoResult<Option<T>>;
    /// Appends a record. Fails with `Duplicate` when the id is taken.
    fn add(&self, entity: &T) -> RepoResult<RecordId>;
    /// Replaces the record with the same id in place.
    fn update(&self, entity: &T) -> RepoResult<()>;
    /// Returns whether a record was removed.
    fn delete(&self, id: RecordId) -> RepoResult<bool>;

    fn upsert(&self, entity: &T) -> RepoResult<RecordId> {
        match self.update(entity) {
            Ok(()) => Ok(entity.id()),
            Err(RepoError::NotFound { .. }) => self.add(entity),
            Err(err) => Err(err),
        }
    }

    /// Returns valid records matching `predicate`, in file order.
    fn find<F>(&self, mut predicate: F) -> RepoResult<Vec<T>>
    where
        F: FnMut(&T) -> bool,
    {
        let mut listed = self.list_lenient()?;
        listed.items.retain(|entity| predicate(entity));
        Ok(listed.items)
    }
}

/// Repository backed by one collection file of a `RecordStore`.
pub struct JsonRepository<'store, T> {
    store: &'store RecordStore,
    _entity: PhantomData<fn() -> T>,
}

impl<'store, T: Entity> JsonRepository<'store, T> {
    pub fn new(store: &'store RecordStore) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &'store RecordStore {
        self.store
    }

    fn load_raw(&self) -> RepoResult<Vec<Record>> {
        Ok(self.store.load(T::COLLECTION)?)
    }

    fn save_raw(&self, records: &[Record]) -> RepoResult<()> {
        self.store.save(T::COLLECTION, records)?;
        Ok(())
    }
}

impl<T: Entity> Repository<T> for JsonRepository<'_, T> {
    fn list(&self) -> RepoResult<Vec<T>> {
        self.load_raw()?
            .into_iter()
            .enumerate()
            .map(|(index, record)| decode_entity(index, record))
            .collect()
    }

    fn list_lenient(&self) -> RepoResult<LenientList<T>> {
        let mut items = Vec::new();
        let mut skipped = 0;
        for (index, record) in self.load_raw()?.into_iter().enumerate() {
            match decode_entity::<T>(index, record) {
                Ok(entity) => items.push(entity),
                Err(err) => {
                    skipped += 1;
                    warn!(
                        "event=record_skip module=repo status=invalid collection={} index={} error={}",
                        T::COLLECTION,
                        index,
                        crate::logging::sanitize_message(&err.to_string(), 160)
                    );
                }
            }
        }
        Ok(LenientList { items, skipped })
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<T>> {
        let mut records = self.load_raw()?;
        match position_of(&records, id) {
            Some(index) => decode_entity(index, records.swap_remove(index)).map(Some),
            None => Ok(None),
        }
    }

    fn add(&self, entity: &T) -> RepoResult<RecordId> {
        entity.validate()?;
        let id = entity.id();

        let mut records = self.load_raw()?;
        if position_of(&records, id).is_some() {
            return Err(RepoError::Duplicate {
                collection: T::COLLECTION,
                id,
            });
        }

        records.push(encode_entity(entity)?);
        self.save_raw(&records)?;
        Ok(id)
    }

    fn update(&self, entity: &T) -> RepoResult<()> {
        entity.validate()?;
        let id = entity.id();

        let mut records = self.load_raw()?;
        let Some(index) = position_of(&records, id) else {
            return Err(RepoError::NotFound {
                collection: T::COLLECTION,
                id,
            });
        };

        records[index] = encode_entity(entity)?;
        self.save_raw(&records)
    }

    fn delete(&self, id: RecordId) -> RepoResult<bool> {
        let records = self.load_raw()?;
        let before = records.len();
        let kept = records
            .into_iter()
            .filter(|record| record_id(record) != Some(id))
            .collect::<Vec<_>>();

        if kept.len() == before {
            return Ok(false);
        }
        self.save_raw(&kept)?;
        Ok(true)
    }
}

fn position_of(records: &[Record], id: RecordId) -> Option<usize> {
    records
        .iter()
        .position(|record| record_id(record) == Some(id))
}

fn decode_entity<T: Entity>(index: usize, record: Record) -> RepoResult<T> {
    let invalid = |message: String| RepoError::InvalidData {
        collection: T::COLLECTION,
        index,
        message,
    };

    let entity: T =
        serde_json::from_value(Value::Object(record)).map_err(|err| invalid(err.to_string()))?;
    entity.validate().map_err(|err| invalid(err.to_string()))?;
    Ok(entity)
}

fn encode_entity<T: Entity>(entity: &T) -> RepoResult<Record> {
    match serde_json::to_value(entity) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(_) => Err(RepoError::InvalidData {
            collection: T::COLLECTION,
            index: 0,
            message: "entity did not serialize to a JSON object".to_string(),
        }),
        Err(source) => Err(RepoError::Store(StoreError::Encode {
            collection: T::COLLECTION,
            source,
        })),
    }
}
