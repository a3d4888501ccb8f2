//! Core domain logic for the Sonolight ERP.
//! This crate owns record storage, typed entities and the tab workspace
//! shared by the desktop bridge and the command-line launcher.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod workspace;

pub use config::{AppConfig, BackupPolicy, ConfigError, LogLevel, MissingFilePolicy};
pub use logging::{flush_logging, init_logging, logging_status};
pub use model::{
    AccountingEntry, Address, Client, Entity, EntryType, Event, Invoice, InvoiceLine,
    InvoiceStatus, InvoiceType, LineItemKind, PaymentKind, PaymentRecord, Product, Quote,
    QuoteLine, QuoteStatus, RecordId, Service, Settings, ValidationError,
};
pub use repo::{JsonRepository, LenientList, RepoError, RepoResult, Repository};
pub use service::{RecordService, ServiceError, ServiceResult, SettingsService};
pub use store::{Collection, Record, RecordStore, SaveOutcome, StoreError, StoreResult};
pub use workspace::{Tab, Workspace, WorkspaceError, WorkspaceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
