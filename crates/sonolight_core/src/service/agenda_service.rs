//! Event listing for the agenda tab.

use super::record_service::{RecordService, ServiceResult};
use crate::model::{Event, RecordId};
use crate::repo::Repository;
use chrono::NaiveDate;

impl<R: Repository<Event>> RecordService<Event, R> {
    /// All events ordered by start date, then title.
    pub fn list_by_date(&self) -> ServiceResult<Vec<Event>> {
        let mut events = self.list()?;
        sort_events(&mut events);
        Ok(events)
    }

    /// Events still running on or after `day`, ordered by start date.
    pub fn list_from(&self, day: NaiveDate) -> ServiceResult<Vec<Event>> {
        let mut events = self.repo().find(|event| event.last_day() >= day)?;
        sort_events(&mut events);
        Ok(events)
    }

    pub fn list_for_quote(&self, quote_id: RecordId) -> ServiceResult<Vec<Event>> {
        Ok(self
            .repo()
            .find(|event| event.quote_id == Some(quote_id))?)
    }
}

fn sort_events(events: &mut [Event]) {
    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));
}
