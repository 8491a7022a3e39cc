//! Durable key-value storage and the persistence adapter.
//!
//! Store state is written as a JSON envelope `{"state": ...}` under a
//! string key, one file per key. A missing or corrupt value degrades to
//! the default state at load time; write failures propagate to the caller
//! of the mutating operation so in-memory and durable state never diverge
//! silently.

use crate::application::store::{Store, StoreState, Subscription};
use crate::domain::{StorageError, StorageResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

/// A synchronous string-keyed blob store.
pub trait Storage {
    /// Returns the raw value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Replaces the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// File-per-key storage rooted at a base directory.
///
/// The key `"job-application-tracker-data"` lands in
/// `job-application-tracker-data.json`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::Write(e.to_string()))?;
        fs::write(self.path_for(key), value).map_err(|e| StorageError::Write(e.to_string()))
    }
}

/// In-memory storage backend.
///
/// Clones share the same map, so one instance can back a store and still be
/// inspected afterwards. Used by tests and anywhere durability across
/// process restarts is not wanted.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    map: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Serialization wrapper around persisted store state.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<S> {
    pub state: S,
}

/// A [`Store`] whose full state is rewritten to durable storage on every
/// mutation.
///
/// At `open` the previously persisted envelope, if present and parseable,
/// provides the initial state; otherwise the store starts from
/// `S::default()`. Fields missing from an older envelope fall back to
/// their serde defaults. Each `set`/`set_with` merges and notifies first,
/// then performs one unconditional synchronous write; a failing write is
/// returned to the caller after the in-memory state has already advanced.
pub struct PersistedStore<S: StoreState + Serialize + DeserializeOwned + 'static> {
    store: Store<S>,
    storage: Rc<dyn Storage>,
    key: String,
}

impl<S: StoreState + Serialize + DeserializeOwned + 'static> PersistedStore<S> {
    /// Opens the store, rehydrating state persisted under `key`.
    ///
    /// A missing or unparseable blob is not an error; it simply means
    /// there is no persisted state. Nothing is written until the first
    /// mutation.
    pub fn open(storage: Rc<dyn Storage>, key: &str) -> Self {
        let initial = storage
            .read(key)
            .and_then(|raw| serde_json::from_str::<Envelope<S>>(&raw).ok())
            .map(|envelope| envelope.state)
            .unwrap_or_default();
        Self {
            store: Store::new(initial),
            storage,
            key: key.to_string(),
        }
    }

    /// Returns a read/subscribe handle to the underlying container.
    pub fn store(&self) -> Store<S> {
        self.store.clone()
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> S {
        self.store.get()
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.store.subscribe(listener)
    }

    /// Merges a literal update, notifies, and persists.
    pub fn set(&self, update: S::Update) -> StorageResult<()> {
        self.store.set(update);
        self.persist()
    }

    /// Merges an update computed from the current state, notifies, and
    /// persists.
    pub fn set_with(&self, f: impl FnOnce(&S) -> S::Update) -> StorageResult<()> {
        self.store.set_with(f);
        self.persist()
    }

    fn persist(&self) -> StorageResult<()> {
        let envelope = Envelope {
            state: self.store.get(),
        };
        let json = serde_json::to_string(&envelope)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.storage.write(&self.key, &json)
    }
}
