//! Accounting journal lookups.

use super::record_service::{RecordService, ServiceResult};
use crate::model::{AccountingEntry, RecordId};
use crate::repo::Repository;

impl<R: Repository<AccountingEntry>> RecordService<AccountingEntry, R> {
    /// Journal ordered by entry date, oldest first.
    pub fn list_journal(&self) -> ServiceResult<Vec<AccountingEntry>> {
        let mut entries = self.list()?;
        entries.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(entries)
    }

    pub fn list_by_invoice(&self, invoice_id: RecordId) -> ServiceResult<Vec<AccountingEntry>> {
        Ok(self
            .repo()
            .find(|entry| entry.invoice_id == Some(invoice_id))?)
    }
}
