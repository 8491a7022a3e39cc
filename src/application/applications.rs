//! The canonical store of job-application records.

use crate::application::store::{Store, StoreState, Subscription};
use crate::domain::{ApplicationDraft, ApplicationPatch, JobApplication, StorageResult};
use crate::infrastructure::{PersistedStore, Storage};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// Durable-storage key for the application records.
pub const STORAGE_KEY: &str = "job-application-tracker-data";

/// Full state of the record store: applications in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationState {
    pub applications: Vec<JobApplication>,
}

/// Partial update for [`ApplicationState`].
#[derive(Debug, Default)]
pub struct ApplicationStateUpdate {
    pub applications: Option<Vec<JobApplication>>,
}

impl StoreState for ApplicationState {
    type Update = ApplicationStateUpdate;

    fn merge(&mut self, update: ApplicationStateUpdate) {
        if let Some(applications) = update.applications {
            self.applications = applications;
        }
    }
}

/// Owns the list of tracked applications and persists it across restarts.
///
/// Every mutating operation rewrites durable storage and notifies
/// subscribers, whether or not it changed anything; update and delete
/// treat an unknown id as a tolerated no-op since the editing session may
/// hold a stale reference.
pub struct ApplicationStore {
    store: PersistedStore<ApplicationState>,
    id_seq: Cell<u64>,
}

impl ApplicationStore {
    /// Opens the store over the given backend, rehydrating any previously
    /// persisted records.
    pub fn open(storage: Rc<dyn Storage>) -> Self {
        Self {
            store: PersistedStore::open(storage, STORAGE_KEY),
            id_seq: Cell::new(0),
        }
    }

    /// Snapshot of the current records, in insertion order.
    pub fn applications(&self) -> Vec<JobApplication> {
        self.store.get().applications
    }

    /// Read/subscribe handle for the presentation layer.
    pub fn store(&self) -> Store<ApplicationState> {
        self.store.store()
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.store.subscribe(listener)
    }

    /// Appends a new record built from `draft` and returns its generated id.
    ///
    /// No validation happens here; the form is responsible for required
    /// fields before submitting.
    pub fn add_application(&self, draft: ApplicationDraft) -> StorageResult<String> {
        let id = self.next_id();
        let record = draft.into_application(id.clone());
        self.store.set_with(|state| {
            let mut applications = state.applications.clone();
            applications.push(record);
            ApplicationStateUpdate {
                applications: Some(applications),
            }
        })?;
        Ok(id)
    }

    /// Merges `patch` into the record with the given id, keeping its
    /// position. An unknown id leaves the list unchanged but still
    /// persists and notifies.
    pub fn update_application(&self, id: &str, patch: ApplicationPatch) -> StorageResult<()> {
        self.store.set_with(|state| {
            let applications = state
                .applications
                .iter()
                .cloned()
                .map(|mut app| {
                    if app.id == id {
                        app.apply(patch.clone());
                    }
                    app
                })
                .collect();
            ApplicationStateUpdate {
                applications: Some(applications),
            }
        })
    }

    /// Removes the record with the given id, if present. An unknown id is
    /// a no-op that still persists and notifies.
    pub fn delete_application(&self, id: &str) -> StorageResult<()> {
        self.store.set_with(|state| {
            let mut applications = state.applications.clone();
            if let Some(pos) = applications.iter().position(|app| app.id == id) {
                applications.remove(pos);
            }
            ApplicationStateUpdate {
                applications: Some(applications),
            }
        })
    }

    /// Generates a process-unique, strictly increasing id.
    ///
    /// The timestamp keeps ids unique across restarts; the counter keeps
    /// them unique within one, even for calls inside the same millisecond.
    fn next_id(&self) -> String {
        let seq = self.id_seq.get();
        self.id_seq.set(seq + 1);
        format!("{}-{}", chrono::Utc::now().timestamp_millis(), seq)
    }
}
