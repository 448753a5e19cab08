//! State-pattern engine that executes effectful transitions.

use crate::builder::{HandleConfigItem, StateConfigItem};
use crate::core::{Name, NamePolicy, NameRegistry, StateItem};
use crate::effects::table::TransitionTable;
use crate::effects::transition::TransitionError;
use crate::parts::{Listener, Observer, Subscription};
use stillwater::effect::Effect;
use thiserror::Error;

/// Errors surfaced to callers of the engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatePartError {
    #[error("Handle name '{name}' is not registered")]
    InvalidHandleName { name: String },

    #[error("State name '{name}' is not registered")]
    InvalidStateName { name: String },
}

/// What a call to [`StatePart::handle`] did.
#[derive(Debug)]
pub enum HandleOutcome {
    /// A new state was committed and subscribers were notified.
    Transitioned,

    /// The transition function declined to produce a state.
    Unchanged,

    /// No transition is defined for this handle in the current state.
    NoTransition,

    /// The transition function failed; nothing was committed.
    Failed(TransitionError),

    /// An unknown name was met under [`NamePolicy::WarnAndIgnore`].
    Ignored(StatePartError),
}

impl HandleOutcome {
    pub fn is_transitioned(&self) -> bool {
        matches!(self, Self::Transitioned)
    }
}

/// Record-style construction options.
pub struct StatePartOptions<S: StateItem, H: Name, O, Env> {
    pub init_state: S,
    pub state_config_items: Vec<StateConfigItem<S, H, O, Env>>,
    pub state_name_list: Vec<S::Name>,
    pub handle_name_list: Vec<H>,
    pub policy: NamePolicy,
    pub env: Env,
}

/// Dynamic finite-state machine over runtime-mutable name sets.
///
/// The engine exclusively owns the current state, the name registry, the
/// transition table and the subscriber set. `handle` borrows the engine
/// mutably across the awaited transition, so two transitions on the same
/// engine can never overlap; hosts sharing an engine across tasks wrap it
/// in a mutex, which serializes them the same way.
///
/// # Example
///
/// ```rust
/// use storeparts::builder::{StateConfigItem, StatePartBuilder};
/// use storeparts::core::StateItem;
/// use stillwater::prelude::*;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Door {
///     state_name: &'static str,
/// }
///
/// impl StateItem for Door {
///     type Name = &'static str;
///     fn state_name(&self) -> &&'static str {
///         &self.state_name
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let mut door = StatePartBuilder::<Door, &'static str, (), ()>::new()
///     .initial(Door { state_name: "closed" })
///     .state_names(["closed", "open"])
///     .handle_names(["push"])
///     .state_config(
///         StateConfigItem::new("closed")
///             .on("push", |_s: &Door, _o: ()| pure(Some(Door { state_name: "open" })).boxed()),
///     )
///     .build()
///     .unwrap();
///
/// door.handle("push", ()).await.unwrap();
/// assert_eq!(door.get_state().state_name, "open");
/// # });
/// ```
pub struct StatePart<S: StateItem, H: Name, O, Env = ()> {
    current: S,
    registry: NameRegistry<S::Name, H>,
    table: TransitionTable<S, H, O, Env>,
    observer: Observer,
    policy: NamePolicy,
    env: Env,
}

impl<S, H, O, Env> StatePart<S, H, O, Env>
where
    S: StateItem,
    H: Name,
    O: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    /// Create an engine from construction options.
    ///
    /// Config cells whose handle name is not in `handle_name_list` are
    /// dropped. The initial state must be registered.
    pub fn new(options: StatePartOptions<S, H, O, Env>) -> Result<Self, StatePartError> {
        let StatePartOptions {
            init_state,
            state_config_items,
            state_name_list,
            handle_name_list,
            policy,
            env,
        } = options;

        let registry = NameRegistry::new(state_name_list, handle_name_list);
        if !registry.is_valid_state(init_state.state_name()) {
            return Err(StatePartError::InvalidStateName {
                name: init_state.state_name().as_str().to_string(),
            });
        }

        let mut part = Self {
            current: init_state,
            registry,
            table: TransitionTable::new(),
            observer: Observer::new(),
            policy,
            env,
        };
        for item in state_config_items {
            part.put_state_cells(item);
        }
        Ok(part)
    }

    /// Current state snapshot.
    pub fn get_state(&self) -> &S {
        &self.current
    }

    pub fn registry(&self) -> &NameRegistry<S::Name, H> {
        &self.registry
    }

    pub fn table(&self) -> &TransitionTable<S, H, O, Env> {
        &self.table
    }

    pub fn policy(&self) -> NamePolicy {
        self.policy
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn has_transition(&self, state: &S::Name, handle: &H) -> bool {
        self.table.contains(state, handle)
    }

    /// Fire `handle` against the current state.
    ///
    /// Unknown handle names, and current or target states missing from the
    /// registry, follow the engine's [`NamePolicy`]. A missing cell, a declined transition and a failed
    /// transition all leave the state untouched and notify nobody.
    pub async fn handle(&mut self, handle: H, options: O) -> Result<HandleOutcome, StatePartError> {
        if !self.registry.is_valid_handle(&handle) {
            return self.reject(StatePartError::InvalidHandleName {
                name: handle.as_str().to_string(),
            });
        }

        let from = self.current.state_name().clone();
        if !self.registry.is_valid_state(&from) {
            return self.reject(StatePartError::InvalidStateName {
                name: from.as_str().to_string(),
            });
        }

        let Some(transition) = self.table.lookup(&from, &handle) else {
            tracing::debug!(
                state = from.as_str(),
                handle = handle.as_str(),
                "no transition defined"
            );
            return Ok(HandleOutcome::NoTransition);
        };

        let result = transition(&self.current, options).run(&self.env).await;

        match result {
            Ok(Some(next)) if !self.registry.is_valid_state(next.state_name()) => {
                self.reject(StatePartError::InvalidStateName {
                    name: next.state_name().as_str().to_string(),
                })
            }
            Ok(Some(next)) => {
                tracing::trace!(
                    from = from.as_str(),
                    to = next.state_name().as_str(),
                    handle = handle.as_str(),
                    "transition committed"
                );
                self.commit(next);
                Ok(HandleOutcome::Transitioned)
            }
            Ok(None) => Ok(HandleOutcome::Unchanged),
            Err(error) => {
                tracing::warn!(
                    state = from.as_str(),
                    handle = handle.as_str(),
                    %error,
                    "transition failed, state unchanged"
                );
                Ok(HandleOutcome::Failed(error))
            }
        }
    }

    /// Replace the current state without consulting the transition table.
    ///
    /// Returns `Ok(true)` when the state was replaced. An unregistered
    /// state name follows the engine's [`NamePolicy`].
    pub fn force_change_state(&mut self, new_state: S) -> Result<bool, StatePartError> {
        if !self.registry.is_valid_state(new_state.state_name()) {
            let error = StatePartError::InvalidStateName {
                name: new_state.state_name().as_str().to_string(),
            };
            return self.reject(error).map(|_| false);
        }
        self.commit(new_state);
        Ok(true)
    }

    /// Subscribe a callback to committed state changes.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.observer.subscribe(callback)
    }

    /// Subscribe a shared listener; subscribing it again is a no-op.
    pub fn subscribe_listener(&self, listener: Listener) -> Subscription {
        self.observer.subscribe_listener(listener)
    }

    pub fn subscriber_count(&self) -> usize {
        self.observer.len()
    }

    /// Register the item's state name and insert its cells. Cells naming
    /// unregistered handles are dropped.
    pub fn set_state_config_item(&mut self, item: StateConfigItem<S, H, O, Env>) {
        self.registry.add_state(item.name().clone());
        self.put_state_cells(item);
    }

    /// Unregister a state and delete all of its cells.
    pub fn remove_state_config_item(&mut self, state: &S::Name) {
        self.registry.remove_state(state);
        let removed = self.table.remove_state(state);
        tracing::debug!(state = state.as_str(), removed, "state config removed");
    }

    /// Register the item's handle name and insert its cells. Cells naming
    /// unregistered states are dropped.
    pub fn set_handle_config_item(&mut self, item: HandleConfigItem<S, H, O, Env>) {
        let (handle, states) = item.into_parts();
        self.registry.add_handle(handle.clone());
        for (state, transition) in states {
            if self.registry.is_valid_state(&state) {
                self.table.put(state, handle.clone(), transition);
            } else {
                tracing::debug!(
                    state = state.as_str(),
                    handle = handle.as_str(),
                    "dropping cell for unregistered state"
                );
            }
        }
    }

    /// Unregister a handle and delete all of its cells.
    pub fn remove_handle_config_item(&mut self, handle: &H) {
        self.registry.remove_handle(handle);
        let removed = self.table.remove_handle(handle);
        tracing::debug!(handle = handle.as_str(), removed, "handle config removed");
    }

    fn put_state_cells(&mut self, item: StateConfigItem<S, H, O, Env>) {
        let (state, handles) = item.into_parts();
        for (handle, transition) in handles {
            if self.registry.is_valid_handle(&handle) {
                self.table.put(state.clone(), handle, transition);
            } else {
                tracing::debug!(
                    state = state.as_str(),
                    handle = handle.as_str(),
                    "dropping cell for unregistered handle"
                );
            }
        }
    }

    fn commit(&mut self, next: S) {
        self.current = next;
        self.observer.notify();
    }

    fn reject(&self, error: StatePartError) -> Result<HandleOutcome, StatePartError> {
        match self.policy {
            NamePolicy::Strict => Err(error),
            NamePolicy::WarnAndIgnore => {
                tracing::warn!(%error, "ignoring operation");
                Ok(HandleOutcome::Ignored(error))
            }
        }
    }
}
