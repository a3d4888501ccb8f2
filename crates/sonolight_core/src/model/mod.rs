//! Typed record definitions for every collection.
//!
//! # Responsibility
//! - Give each collection an explicit schema on top of the raw JSON store.
//! - Keep the on-disk field names of existing data files.
//!
//! # Invariants
//! - Every entity is identified by a stable, non-nil `RecordId`.
//! - Keys a typed view does not know are kept in `extra` and written back.
//! - Stored totals are snapshots; nothing here recomputes them.

pub mod accounting;
pub mod catalog;
pub mod client;
pub mod common;
pub mod event;
pub mod invoice;
pub mod quote;
pub mod settings;
pub mod timestamp;

use crate::store::Collection;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use accounting::{AccountingEntry, EntryType};
pub use catalog::{Product, Service};
pub use client::{Address, Client};
pub use common::{format_cents, RecordId, ValidationError};
pub use event::Event;
pub use invoice::{Invoice, InvoiceLine, InvoiceStatus, InvoiceType};
pub use quote::{LineItemKind, PaymentKind, PaymentRecord, Quote, QuoteLine, QuoteStatus};
pub use settings::{CalendarSettings, CompanyInfo, NumberingSettings, Settings};

/// A typed record stored in one collection and keyed by `id`.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    /// Collection holding this entity.
    const COLLECTION: Collection;

    fn id(&self) -> RecordId;

    /// Checks field-level invariants. Called before every typed write and
    /// after every typed read.
    fn validate(&self) -> Result<(), ValidationError>;
}
