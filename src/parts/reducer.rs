//! Reducer-style store: state plus a pure reducer.

use crate::parts::observer::{Observer, Subscription};
use parking_lot::RwLock;
use std::sync::Arc;

/// Pure reducer: `(state, action, initial) -> next state`.
///
/// The initial state is passed so reducers can implement "reset" actions.
pub type Reducer<S, A> = Arc<dyn Fn(&S, A, &S) -> S + Send + Sync>;

/// Minimal state container driven by dispatched actions.
///
/// Clones share the same state and subscribers.
///
/// # Example
///
/// ```rust
/// use storeparts::parts::ReducerStore;
///
/// enum Action {
///     Add(i32),
///     Reset,
/// }
///
/// let store = ReducerStore::new(
///     |count: &i32, action: Action, initial: &i32| match action {
///         Action::Add(n) => count + n,
///         Action::Reset => *initial,
///     },
///     0,
/// );
///
/// store.dispatch(Action::Add(2));
/// store.dispatch(Action::Add(3));
/// assert_eq!(store.get_store(), 5);
///
/// store.dispatch(Action::Reset);
/// assert_eq!(store.get_store(), 0);
/// ```
pub struct ReducerStore<S, A> {
    state: Arc<RwLock<S>>,
    initial: Arc<S>,
    reducer: Reducer<S, A>,
    observer: Arc<Observer>,
}

impl<S, A> ReducerStore<S, A>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new<F>(reducer: F, initial: S) -> Self
    where
        F: Fn(&S, A, &S) -> S + Send + Sync + 'static,
    {
        Self {
            state: Arc::new(RwLock::new(initial.clone())),
            initial: Arc::new(initial),
            reducer: Arc::new(reducer),
            observer: Arc::new(Observer::new()),
        }
    }

    /// Reduce the action into the state, then notify subscribers.
    pub fn dispatch(&self, action: A) {
        {
            let mut state = self.state.write();
            let next = (self.reducer)(&*state, action, &self.initial);
            *state = next;
        }
        self.observer.notify();
    }

    pub fn get_store(&self) -> S {
        self.state.read().clone()
    }

    /// Read through a selector without cloning the whole state.
    pub fn select<T>(&self, selector: impl FnOnce(&S) -> T) -> T {
        selector(&*self.state.read())
    }

    /// Bind a selector into a zero-argument getter that always reads the
    /// latest state.
    pub fn get_store_snapshot<T, F>(&self, selector: F) -> impl Fn() -> T
    where
        F: Fn(&S) -> T,
    {
        let state = Arc::clone(&self.state);
        move || selector(&*state.read())
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.observer.subscribe(callback)
    }
}

impl<S, A> Clone for ReducerStore<S, A> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            initial: Arc::clone(&self.initial),
            reducer: Arc::clone(&self.reducer),
            observer: Arc::clone(&self.observer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug, PartialEq)]
    struct Dialog {
        open: bool,
        title: String,
    }

    enum DialogAction {
        Open(String),
        Close,
        Reset,
    }

    fn dialog_reducer(state: &Dialog, action: DialogAction, initial: &Dialog) -> Dialog {
        match action {
            DialogAction::Open(title) => Dialog { open: true, title },
            DialogAction::Close => Dialog {
                open: false,
                ..state.clone()
            },
            DialogAction::Reset => initial.clone(),
        }
    }

    fn store() -> ReducerStore<Dialog, DialogAction> {
        ReducerStore::new(
            dialog_reducer,
            Dialog {
                open: false,
                title: String::new(),
            },
        )
    }

    #[test]
    fn dispatch_applies_reducer() {
        let store = store();
        store.dispatch(DialogAction::Open("Delete?".to_string()));
        assert_eq!(
            store.get_store(),
            Dialog {
                open: true,
                title: "Delete?".to_string()
            }
        );

        store.dispatch(DialogAction::Close);
        assert!(!store.get_store().open);
        assert_eq!(store.get_store().title, "Delete?");
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let store = store();
        store.dispatch(DialogAction::Open("Rename".to_string()));
        store.dispatch(DialogAction::Reset);
        assert_eq!(store.get_store().title, "");
    }

    #[test]
    fn snapshot_getter_tracks_latest_state() {
        let store = store();
        let is_open = store.get_store_snapshot(|d: &Dialog| d.open);
        assert!(!is_open());

        store.dispatch(DialogAction::Open("Hi".to_string()));
        assert!(is_open());
        assert_eq!(store.select(|d| d.title.len()), 2);
    }

    #[test]
    fn dispatch_notifies_subscribers() {
        let store = store();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let subscription = store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.dispatch(DialogAction::Close);
        subscription.unsubscribe();
        store.dispatch(DialogAction::Close);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clones_share_state() {
        let store = store();
        let other = store.clone();
        other.dispatch(DialogAction::Open("Shared".to_string()));
        assert!(store.get_store().open);
    }
}
