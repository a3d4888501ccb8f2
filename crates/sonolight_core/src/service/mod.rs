//! Core use-case services.
//!
//! # Responsibility
//! - Wrap repositories into per-tab use-case APIs.
//! - Keep UI/FFI layers decoupled from storage details.
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - Services hold no business rules (no pricing, numbering or workflow).

pub mod accounting_service;
pub mod agenda_service;
pub mod catalog_service;
pub mod record_service;
pub mod sales_service;
pub mod settings_service;

pub use record_service::{
    AccountingService, ClientService, EventService, InvoiceService, ProductService,
    OfferingService, QuoteService, RecordService, ServiceError, ServiceResult,
};
pub use settings_service::SettingsService;
