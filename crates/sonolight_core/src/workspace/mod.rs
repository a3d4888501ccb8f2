//! Tab workspace: the in-memory state behind the tabbed window.
//!
//! # Responsibility
//! - Own one cached, editable copy of each opened collection.
//! - Track unsaved edits per tab and persist them on request.
//!
//! # Invariants
//! - There is one tab per collection, in `Collection::ALL` order.
//! - A tab is loaded from disk at most once until it is reloaded or closed.
//! - Saving a tab writes its whole cached collection and clears its dirty
//!   flag; other tabs are untouched.
//!
//! The workspace is plain owned state. Callers construct it and pass it
//! to whatever renders the tabs.

mod tab;

pub use tab::Tab;

use crate::model::RecordId;
use crate::store::{record_id, Collection, Record, RecordStore, SaveOutcome, StoreError};
use log::info;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

#[derive(Debug)]
pub enum WorkspaceError {
    Store(StoreError),
    RecordNotFound {
        collection: Collection,
        id: RecordId,
    },
}

impl Display for WorkspaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::RecordNotFound { collection, id } => {
                write!(f, "{collection} record not found in tab: {id}")
            }
        }
    }
}

impl Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::RecordNotFound { .. } => None,
        }
    }
}

impl From<StoreError> for WorkspaceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

#[derive(Debug, Default)]
struct TabState {
    records: Vec<Record>,
    dirty: bool,
}

/// Owned UI state over a record store.
#[derive(Debug)]
pub struct Workspace {
    store: RecordStore,
    tabs: BTreeMap<Collection, TabState>,
}

impl Workspace {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            tabs: BTreeMap::new(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Tabs in display order.
    pub fn tabs(&self) -> Vec<Tab> {
        Tab::all()
    }

    pub fn is_open(&self, collection: Collection) -> bool {
        self.tabs.contains_key(&collection)
    }

    /// Returns the tab's records, loading them on first access.
    pub fn open_tab(&mut self, collection: Collection) -> WorkspaceResult<&[Record]> {
        Ok(&self.tab_mut(collection)?.records)
    }

    /// Discards cached edits and reloads the tab from disk.
    pub fn reload_tab(&mut self, collection: Collection) -> WorkspaceResult<&[Record]> {
        self.tabs.remove(&collection);
        self.open_tab(collection)
    }

    /// Drops the cached tab. Returns whether it held unsaved edits.
    pub fn close_tab(&mut self, collection: Collection) -> bool {
        self.tabs
            .remove(&collection)
            .is_some_and(|state| state.dirty)
    }

    /// Cached records of an opened tab.
    pub fn records(&self, collection: Collection) -> Option<&[Record]> {
        self.tabs
            .get(&collection)
            .map(|state| state.records.as_slice())
    }

    /// Looks up one cached record by id.
    pub fn record(&self, collection: Collection, id: RecordId) -> Option<&Record> {
        self.records(collection)?
            .iter()
            .find(|record| record_id(record) == Some(id))
    }

    /// Appends a record to the tab. A missing or unparsable `id` is
    /// replaced by a fresh one, which is returned.
    pub fn insert_record(
        &mut self,
        collection: Collection,
        mut record: Record,
    ) -> WorkspaceResult<RecordId> {
        let id = match record_id(&record) {
            Some(id) if !id.is_nil() => id,
            _ => {
                let id = Uuid::new_v4();
                record.insert("id".to_string(), Value::String(id.to_string()));
                id
            }
        };

        let state = self.tab_mut(collection)?;
        state.records.push(record);
        state.dirty = true;
        Ok(id)
    }

    /// Replaces the record with `id` in place. The stored `id` is kept.
    pub fn replace_record(
        &mut self,
        collection: Collection,
        id: RecordId,
        mut record: Record,
    ) -> WorkspaceResult<()> {
        let state = self.tab_mut(collection)?;
        let slot = state
            .records
            .iter_mut()
            .find(|existing| record_id(existing) == Some(id))
            .ok_or(WorkspaceError::RecordNotFound { collection, id })?;

        record.insert("id".to_string(), Value::String(id.to_string()));
        *slot = record;
        state.dirty = true;
        Ok(())
    }

    /// Removes every record with `id`. Returns whether anything was removed.
    pub fn remove_record(&mut self, collection: Collection, id: RecordId) -> WorkspaceResult<bool> {
        let state = self.tab_mut(collection)?;
        let before = state.records.len();
        state.records.retain(|record| record_id(record) != Some(id));
        let removed = state.records.len() != before;
        if removed {
            state.dirty = true;
        }
        Ok(removed)
    }

    pub fn is_dirty(&self, collection: Collection) -> bool {
        self.tabs.get(&collection).is_some_and(|state| state.dirty)
    }

    /// Tabs holding unsaved edits, in display order.
    pub fn dirty_tabs(&self) -> Vec<Collection> {
        self.tabs
            .iter()
            .filter(|(_, state)| state.dirty)
            .map(|(collection, _)| *collection)
            .collect()
    }

    /// Writes the cached records of one tab. An unopened tab has nothing
    /// to save and reports `Unchanged`.
    pub fn save_tab(&mut self, collection: Collection) -> WorkspaceResult<SaveOutcome> {
        let Some(state) = self.tabs.get_mut(&collection) else {
            return Ok(SaveOutcome::Unchanged);
        };
        let outcome = self.store.save(collection, &state.records)?;
        state.dirty = false;
        Ok(outcome)
    }

    /// Saves every dirty tab. Stops at the first failure; tabs saved before
    /// it stay saved. Returns the collections that were saved.
    pub fn save_all(&mut self) -> WorkspaceResult<Vec<Collection>> {
        let dirty = self.dirty_tabs();
        for collection in &dirty {
            self.save_tab(*collection)?;
        }
        if !dirty.is_empty() {
            info!(
                "event=workspace_save module=workspace status=ok tabs={}",
                dirty.len()
            );
        }
        Ok(dirty)
    }

    fn tab_mut(&mut self, collection: Collection) -> WorkspaceResult<&mut TabState> {
        if !self.tabs.contains_key(&collection) {
            let records = self.store.load(collection)?;
            self.tabs.insert(
                collection,
                TabState {
                    records,
                    dirty: false,
                },
            );
        }
        Ok(self.tabs.entry(collection).or_default())
    }
}
