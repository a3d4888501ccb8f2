//! Catalog lookups shared by products and services.

use super::record_service::{RecordService, ServiceResult};
use crate::model::{Entity, Product, Service};
use crate::repo::Repository;

/// Common shape of catalog entries.
pub trait CatalogItem {
    fn reference(&self) -> &str;
    fn label(&self) -> &str;
    fn is_active(&self) -> bool;
}

impl CatalogItem for Product {
    fn reference(&self) -> &str {
        &self.reference
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl CatalogItem for Service {
    fn reference(&self) -> &str {
        &self.reference
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl<T, R> RecordService<T, R>
where
    T: Entity + CatalogItem,
    R: Repository<T>,
{
    /// Active items, sorted by label for pickers.
    pub fn list_active(&self) -> ServiceResult<Vec<T>> {
        let mut items = self.repo().find(|item| item.is_active())?;
        items.sort_by(|a, b| a.label().to_lowercase().cmp(&b.label().to_lowercase()));
        Ok(items)
    }

    /// First item whose reference matches, ignoring case and padding.
    pub fn find_by_reference(&self, reference: &str) -> ServiceResult<Option<T>> {
        let wanted = reference.trim();
        let found = self
            .repo()
            .find(|item| item.reference().trim().eq_ignore_ascii_case(wanted))?;
        Ok(found.into_iter().next())
    }
}
