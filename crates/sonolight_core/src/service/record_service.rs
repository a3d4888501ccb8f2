//! Generic record use-case service.
//!
//! # Responsibility
//! - Provide stable list/get/add/update/delete entry points per collection.
//! - Log each mutation as a metadata-only event.
//!
//! # Invariants
//! - Listing for display is lenient: invalid records are skipped, not fatal.
//! - `NotFound` from the repository surfaces as `ServiceError::NotFound`.

use crate::model::{
    AccountingEntry, Client, Entity, Event, Invoice, Product, Quote, RecordId, Service,
};
use crate::repo::{RepoError, Repository};
use crate::store::Collection;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    NotFound {
        collection: Collection,
        id: RecordId,
    },
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { collection, id } => Self::NotFound { collection, id },
            other => Self::Repo(other),
        }
    }
}

/// Use-case facade over one entity repository.
pub struct RecordService<T: Entity, R: Repository<T>> {
    repo: R,
    _entity: PhantomData<fn() -> T>,
}

pub type ClientService<R> = RecordService<Client, R>;
pub type ProductService<R> = RecordService<Product, R>;
pub type OfferingService<R> = RecordService<Service, R>;
pub type QuoteService<R> = RecordService<Quote, R>;
pub type InvoiceService<R> = RecordService<Invoice, R>;
pub type EventService<R> = RecordService<Event, R>;
pub type AccountingService<R> = RecordService<AccountingEntry, R>;

impl<T: Entity, R: Repository<T>> RecordService<T, R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            _entity: PhantomData,
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Lists valid records for display, skipping invalid ones.
    pub fn list(&self) -> ServiceResult<Vec<T>> {
        let listed = self.repo.list_lenient()?;
        if listed.skipped > 0 {
            warn!(
                "event=record_list module=service status=partial collection={} items={} skipped={}",
                T::COLLECTION,
                listed.items.len(),
                listed.skipped
            );
        }
        Ok(listed.items)
    }

    /// Lists every record, failing on the first invalid one.
    pub fn list_strict(&self) -> ServiceResult<Vec<T>> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: RecordId) -> ServiceResult<Option<T>> {
        Ok(self.repo.get(id)?)
    }

    /// Like `get`, but a missing record is an error.
    pub fn require(&self, id: RecordId) -> ServiceResult<T> {
        self.get(id)?.ok_or(ServiceError::NotFound {
            collection: T::COLLECTION,
            id,
        })
    }

    pub fn add(&self, entity: &T) -> ServiceResult<RecordId> {
        let id = self.repo.add(entity)?;
        info!(
            "event=record_add module=service status=ok collection={} id={}",
            T::COLLECTION,
            id
        );
        Ok(id)
    }

    pub fn update(&self, entity: &T) -> ServiceResult<()> {
        self.repo.update(entity)?;
        info!(
            "event=record_update module=service status=ok collection={} id={}",
            T::COLLECTION,
            entity.id()
        );
        Ok(())
    }

    /// Updates the record when it exists, adds it otherwise.
    pub fn save(&self, entity: &T) -> ServiceResult<RecordId> {
        let id = self.repo.upsert(entity)?;
        info!(
            "event=record_save module=service status=ok collection={} id={}",
            T::COLLECTION,
            id
        );
        Ok(id)
    }

    /// Deletes by id. Deleting an absent record is not an error.
    pub fn delete(&self, id: RecordId) -> ServiceResult<bool> {
        let removed = self.repo.delete(id)?;
        info!(
            "event=record_delete module=service status={} collection={} id={}",
            if removed { "ok" } else { "absent" },
            T::COLLECTION,
            id
        );
        Ok(removed)
    }
}
