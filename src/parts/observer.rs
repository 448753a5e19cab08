//! Publish/subscribe notifier with idempotent subscriptions.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Zero-argument callback run on every notification.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

type ListenerSet = Arc<Mutex<Vec<Listener>>>;

pub(crate) fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// A set of listeners notified synchronously, in subscription order.
///
/// Listeners are compared by identity: subscribing the same [`Listener`]
/// twice keeps a single entry.
///
/// # Example
///
/// ```rust
/// use storeparts::parts::Observer;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let observer = Observer::new();
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&hits);
/// let subscription = observer.subscribe(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// observer.notify();
/// subscription.unsubscribe();
/// observer.notify();
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
#[derive(Default)]
pub struct Observer {
    listeners: ListenerSet,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a closure. Every call creates a distinct listener.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe_listener(Arc::new(callback))
    }

    /// Subscribe a shared listener. A listener already present is kept once.
    pub fn subscribe_listener(&self, listener: Listener) -> Subscription {
        {
            let mut listeners = self.listeners.lock();
            if !listeners.iter().any(|l| same_listener(l, &listener)) {
                listeners.push(Arc::clone(&listener));
            }
        }
        let listeners: Weak<Mutex<Vec<Listener>>> = Arc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.lock().retain(|l| !same_listener(l, &listener));
            }
        })
    }

    /// Run every listener. The lock is released before callbacks run, so a
    /// listener may subscribe or unsubscribe while being notified.
    ///
    /// Listeners unsubscribed earlier in the same pass are skipped; listeners
    /// subscribed during the pass wait for the next one.
    pub fn notify(&self) {
        let snapshot: Vec<Listener> = self.listeners.lock().clone();
        for listener in snapshot {
            if self.contains(&listener) {
                listener();
            }
        }
    }

    fn contains(&self, listener: &Listener) -> bool {
        self.listeners
            .lock()
            .iter()
            .any(|l| same_listener(l, listener))
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.lock().is_empty()
    }
}

/// Handle returned by `subscribe`; removes exactly its own listener.
///
/// Dropping the handle does not unsubscribe.
pub struct Subscription {
    cancel: Box<dyn Fn() + Send + Sync>,
}

impl Subscription {
    pub(crate) fn new<F>(cancel: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            cancel: Box::new(cancel),
        }
    }

    /// Remove the listener. Calling this more than once is a no-op, as is
    /// calling it after the observer is gone.
    pub fn unsubscribe(&self) {
        (self.cancel)()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
