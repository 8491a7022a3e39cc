//! Observable state containers for the tracker.
//!
//! A [`Store`] holds a single state value, hands out snapshot reads, and
//! notifies subscribers synchronously after every mutation. It is the
//! single-threaded backbone the record and session stores are built on.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// State that can absorb a partial update.
///
/// Each state type declares its update shape explicitly and merges it field
/// by field, so an update can never smuggle in unknown fields: a field the
/// update leaves unset keeps its current value.
pub trait StoreState: Clone + Default {
    type Update;

    /// Shallow-merges `update` into `self`.
    fn merge(&mut self, update: Self::Update);
}

struct StoreInner<S: StoreState> {
    state: RefCell<S>,
    listeners: RefCell<Vec<(u64, Rc<dyn Fn()>)>>,
    next_listener_id: Cell<u64>,
}

/// A shared, observable holder for one state value.
///
/// Handles are cheap to clone and refer to the same underlying state, which
/// lets a subscriber read the store from inside its own callback. All
/// operations run synchronously to completion on the calling thread; the
/// container is deliberately not `Send` because the tracker processes one
/// UI event at a time.
///
/// # Examples
///
/// ```
/// use jobtrack::application::{SessionState, SessionUpdate, Store};
///
/// let store = Store::new(SessionState::default());
/// store.set(SessionUpdate {
///     editing_application_id: Some(Some("abc".to_string())),
/// });
/// assert_eq!(store.get().editing_application_id.as_deref(), Some("abc"));
/// ```
pub struct Store<S: StoreState> {
    inner: Rc<StoreInner<S>>,
}

impl<S: StoreState> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: StoreState + 'static> Store<S> {
    /// Creates a store holding `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(initial),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
            }),
        }
    }

    /// Returns a snapshot of the current state. Never blocks, never fails.
    pub fn get(&self) -> S {
        self.inner.state.borrow().clone()
    }

    /// Reads the current state in place without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// Merges a literal partial update into the state, then notifies every
    /// subscriber.
    pub fn set(&self, update: S::Update) {
        self.inner.state.borrow_mut().merge(update);
        self.notify();
    }

    /// Computes a partial update from the current state, merges it in, then
    /// notifies every subscriber.
    pub fn set_with(&self, f: impl FnOnce(&S) -> S::Update) {
        let update = f(&self.inner.state.borrow());
        self.inner.state.borrow_mut().merge(update);
        self.notify();
    }

    /// Registers a callback invoked after every mutation.
    ///
    /// Listeners run synchronously in subscription order and receive no
    /// arguments; a listener that wants the new state reads it back through
    /// its own store handle. The returned [`Subscription`] deregisters the
    /// listener; dropping it without calling
    /// [`unsubscribe`](Subscription::unsubscribe) leaves the listener
    /// registered for the life of the store.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        let weak: Weak<StoreInner<S>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    /// Invokes every currently registered listener.
    ///
    /// The listener list is snapshotted first, so a listener that
    /// unsubscribes (or subscribes) during the pass cannot disturb the
    /// ongoing iteration; no borrow is held while callbacks run.
    fn notify(&self) {
        let snapshot: Vec<Rc<dyn Fn()>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener();
        }
    }
}

/// Handle returned by [`Store::subscribe`]; consumes itself to deregister
/// the listener.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Removes the listener. Safe to call at any time, including from
    /// inside a notification pass or after the store has been dropped.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
