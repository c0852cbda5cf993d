//! Listener registry for store change notifications.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Change listener. Called with no arguments; listeners query the store.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

type ListenerMap = Mutex<BTreeMap<u64, Listener>>;

/// Set of listeners keyed by registration order.
#[derive(Default)]
pub struct Subscribers {
    listeners: Arc<ListenerMap>,
    next_id: AtomicU64,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: Listener) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().insert(id, listener);
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
            active: AtomicBool::new(true),
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every listener registered when notification starts. The lock is
    /// released before any listener runs.
    pub fn notify(&self) {
        let snapshot: Vec<Listener> = self.listeners.lock().values().cloned().collect();
        for listener in snapshot {
            listener();
        }
    }
}

/// Handle returned by `subscribe`. Dropping it keeps the listener registered.
pub struct Subscription {
    id: u64,
    listeners: Weak<ListenerMap>,
    active: AtomicBool,
}

impl Subscription {
    /// Remove the listener. Further calls do nothing.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.lock().remove(&self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}
