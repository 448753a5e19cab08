//! Observer fanning notifications out per key.

use crate::parts::observer::{same_listener, Listener, Subscription};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Listener sets plus the order their keys were first subscribed in.
struct KeyedSets<K> {
    order: Vec<K>,
    sets: HashMap<K, Vec<Listener>>,
}

impl<K: Eq + Hash> KeyedSets<K> {
    fn contains(&self, key: &K, listener: &Listener) -> bool {
        self.sets
            .get(key)
            .is_some_and(|set| set.iter().any(|l| same_listener(l, listener)))
    }
}

type KeyedListeners<K> = Arc<Mutex<KeyedSets<K>>>;

/// Listener sets addressed by key, so that independent aspects of a store
/// (say "open changed" and "options changed") notify independently.
///
/// # Example
///
/// ```rust
/// use storeparts::parts::KeyedObserver;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let observer = KeyedObserver::new();
/// let opened = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&opened);
/// observer.subscribe_key("open", move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// observer.trigger_key(&"open");
/// observer.trigger_key(&"options");
/// assert_eq!(opened.load(Ordering::SeqCst), 1);
/// ```
pub struct KeyedObserver<K> {
    listeners: KeyedListeners<K>,
}

impl<K> KeyedObserver<K>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(KeyedSets {
                order: Vec::new(),
                sets: HashMap::new(),
            })),
        }
    }

    pub fn subscribe_key<F>(&self, key: K, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe_key_listener(key, Arc::new(callback))
    }

    /// Subscribe a shared listener under `key`; already present means kept once.
    pub fn subscribe_key_listener(&self, key: K, listener: Listener) -> Subscription {
        {
            let mut keyed = self.listeners.lock();
            if !keyed.sets.contains_key(&key) {
                keyed.order.push(key.clone());
            }
            let set = keyed.sets.entry(key.clone()).or_default();
            if !set.iter().any(|l| same_listener(l, &listener)) {
                set.push(Arc::clone(&listener));
            }
        }
        let weak = Arc::downgrade(&self.listeners);
        Subscription::new(move || {
            let Some(listeners) = weak.upgrade() else {
                return;
            };
            let mut keyed = listeners.lock();
            let emptied = match keyed.sets.get_mut(&key) {
                Some(set) => {
                    set.retain(|l| !same_listener(l, &listener));
                    set.is_empty()
                }
                None => false,
            };
            if emptied {
                keyed.sets.remove(&key);
                keyed.order.retain(|k| k != &key);
            }
        })
    }

    /// Run the listeners of `key`. Listeners unsubscribed earlier in the
    /// same pass are skipped.
    pub fn trigger_key(&self, key: &K) {
        let snapshot = self
            .listeners
            .lock()
            .sets
            .get(key)
            .cloned()
            .unwrap_or_default();
        for listener in snapshot {
            if self.listeners.lock().contains(key, &listener) {
                listener();
            }
        }
    }

    /// Trigger each key in turn; listeners of a repeated key run again.
    pub fn trigger_keys<'a, I>(&self, keys: I)
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        for key in keys {
            self.trigger_key(key);
        }
    }

    /// Run every listener, key by key in the order keys were first
    /// subscribed.
    pub fn trigger_all(&self) {
        let snapshot: Vec<(K, Listener)> = {
            let keyed = self.listeners.lock();
            keyed
                .order
                .iter()
                .filter_map(|key| keyed.sets.get(key).map(|set| (key, set)))
                .flat_map(|(key, set)| set.iter().map(move |l| (key.clone(), Arc::clone(l))))
                .collect()
        };
        for (key, listener) in snapshot {
            if self.listeners.lock().contains(&key, &listener) {
                listener();
            }
        }
    }

    pub fn has_listeners(&self, key: &K) -> bool {
        self.listeners.lock().sets.contains_key(key)
    }

    pub fn key_count(&self) -> usize {
        self.listeners.lock().sets.len()
    }
}

impl<K> Default for KeyedObserver<K>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
