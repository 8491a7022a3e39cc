//! The editing-session store: which record, if any, is being edited.
//!
//! Deliberately unpersisted; an in-progress edit does not survive a
//! restart. The id held here is a non-owning reference into the record
//! store and may go stale, which consumers must treat as "no record
//! found" rather than an error.

use crate::application::store::{Store, StoreState, Subscription};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub editing_application_id: Option<String>,
}

/// Partial update for [`SessionState`]. The outer `Option` marks whether
/// the field is being set at all; the inner one is the value.
#[derive(Debug, Default)]
pub struct SessionUpdate {
    pub editing_application_id: Option<Option<String>>,
}

impl StoreState for SessionState {
    type Update = SessionUpdate;

    fn merge(&mut self, update: SessionUpdate) {
        if let Some(id) = update.editing_application_id {
            self.editing_application_id = id;
        }
    }
}

/// Holds the id of the record currently being edited, or none.
pub struct SessionStore {
    store: Store<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            store: Store::new(SessionState::default()),
        }
    }

    /// The id under edit, if any.
    pub fn editing_application_id(&self) -> Option<String> {
        self.store.get().editing_application_id
    }

    /// Marks `id` as being edited, whether or not it names a live record.
    pub fn start_editing(&self, id: &str) {
        self.store.set(SessionUpdate {
            editing_application_id: Some(Some(id.to_string())),
        });
    }

    /// Clears the edit session.
    pub fn stop_editing(&self) {
        self.store.set(SessionUpdate {
            editing_application_id: Some(None),
        });
    }

    pub fn store(&self) -> Store<SessionState> {
        self.store.clone()
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.store.subscribe(listener)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_no_session() {
        let session = SessionStore::new();
        assert!(session.editing_application_id().is_none());
    }

    #[test]
    fn test_start_then_stop_editing() {
        let session = SessionStore::new();
        session.start_editing("x");
        assert_eq!(session.editing_application_id().as_deref(), Some("x"));

        session.stop_editing();
        assert!(session.editing_application_id().is_none());
    }

    #[test]
    fn test_stale_id_is_accepted() {
        // The session never checks the record store; any id is valid input
        let session = SessionStore::new();
        session.start_editing("id-that-never-existed");
        assert_eq!(
            session.editing_application_id().as_deref(),
            Some("id-that-never-existed")
        );
    }

    #[test]
    fn test_start_editing_replaces_previous_session() {
        let session = SessionStore::new();
        session.start_editing("a");
        session.start_editing("b");
        assert_eq!(session.editing_application_id().as_deref(), Some("b"));
    }

    #[test]
    fn test_mutations_notify_subscribers() {
        let session = SessionStore::new();
        let calls = std::rc::Rc::new(std::cell::Cell::new(0u32));
        let counter = std::rc::Rc::clone(&calls);
        let _sub = session.subscribe(move || counter.set(counter.get() + 1));

        session.start_editing("x");
        session.stop_editing();
        assert_eq!(calls.get(), 2);
    }
}
