//! Quote and invoice lookups.

use super::record_service::{RecordService, ServiceResult};
use crate::model::{Invoice, Quote, RecordId};
use crate::repo::Repository;

impl<R: Repository<Quote>> RecordService<Quote, R> {
    /// Quotes of one client, newest first.
    pub fn list_by_client(&self, client_id: RecordId) -> ServiceResult<Vec<Quote>> {
        let mut quotes = self.repo().find(|quote| quote.client_id == client_id)?;
        quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quotes)
    }

    pub fn find_by_number(&self, number: &str) -> ServiceResult<Option<Quote>> {
        let wanted = number.trim();
        let found = self
            .repo()
            .find(|quote| quote.number.as_deref().map(str::trim) == Some(wanted))?;
        Ok(found.into_iter().next())
    }
}

impl<R: Repository<Invoice>> RecordService<Invoice, R> {
    /// Invoices issued against one quote, in file order.
    pub fn list_by_quote(&self, quote_id: RecordId) -> ServiceResult<Vec<Invoice>> {
        Ok(self.repo().find(|invoice| invoice.quote_id == quote_id)?)
    }

    pub fn list_by_client(&self, client_id: RecordId) -> ServiceResult<Vec<Invoice>> {
        Ok(self.repo().find(|invoice| invoice.client_id == client_id)?)
    }
}
