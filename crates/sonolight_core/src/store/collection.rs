//! Fixed set of record collections and their backing file names.

use std::fmt::{Display, Formatter};

/// One entity collection, backed by one JSON file in the data directory.
///
/// Declaration order is the tab order of the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    Clients,
    Products,
    Services,
    Quotes,
    Invoices,
    Events,
    AccountingEntries,
    Settings,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Clients,
        Collection::Products,
        Collection::Services,
        Collection::Quotes,
        Collection::Invoices,
        Collection::Events,
        Collection::AccountingEntries,
        Collection::Settings,
    ];

    /// Stable snake_case name, also the file stem.
    pub fn name(self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Products => "products",
            Self::Services => "services",
            Self::Quotes => "quotes",
            Self::Invoices => "invoices",
            Self::Events => "events",
            Self::AccountingEntries => "accounting_entries",
            Self::Settings => "settings",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Clients => "clients.json",
            Self::Products => "products.json",
            Self::Services => "services.json",
            Self::Quotes => "quotes.json",
            Self::Invoices => "invoices.json",
            Self::Events => "events.json",
            Self::AccountingEntries => "accounting_entries.json",
            Self::Settings => "settings.json",
        }
    }

    /// Parses a collection name. Accepts the file name and `-` separators.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        let stem = normalized.strip_suffix(".json").unwrap_or(&normalized);
        Self::ALL.into_iter().find(|collection| collection.name() == stem)
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Collection;

    #[test]
    fn file_names_follow_collection_names() {
        for collection in Collection::ALL {
            assert_eq!(
                collection.file_name(),
                format!("{}.json", collection.name())
            );
        }
    }

    #[test]
    fn parse_accepts_names_file_names_and_dashes() {
        assert_eq!(Collection::parse("clients"), Some(Collection::Clients));
        assert_eq!(
            Collection::parse(" Accounting-Entries "),
            Some(Collection::AccountingEntries)
        );
        assert_eq!(Collection::parse("settings.json"), Some(Collection::Settings));
        assert_eq!(Collection::parse("orders"), None);
    }
}
