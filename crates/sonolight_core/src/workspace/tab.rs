//! Tab descriptors.

use crate::store::Collection;

/// One tab of the main window, bound to one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tab {
    pub collection: Collection,
    pub label: &'static str,
}

impl Tab {
    pub fn for_collection(collection: Collection) -> Self {
        let label = match collection {
            Collection::Clients => "Clients",
            Collection::Products => "Products",
            Collection::Services => "Services",
            Collection::Quotes => "Quotes",
            Collection::Invoices => "Invoices",
            Collection::Events => "Events",
            Collection::AccountingEntries => "Accounting",
            Collection::Settings => "Settings",
        };
        Self { collection, label }
    }

    pub fn all() -> Vec<Tab> {
        Collection::ALL.into_iter().map(Self::for_collection).collect()
    }
}
