//! Transition functions and the keys that address them.

use crate::core::{Name, StateItem};
use std::sync::Arc;
use stillwater::effect::BoxedEffect;

/// Errors a transition function can fail with.
///
/// The engine contains these: a failing transition never mutates state and
/// never reaches the caller as an `Err`.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("Transition rejected: {0}")]
    Rejected(String),

    #[error("Transition action failed: {0}")]
    ActionFailed(String),
}

/// Type alias for transition functions.
///
/// Each call builds a fresh effect from the current snapshot and the
/// trigger options. Running the effect yields:
/// - `Ok(Some(next))` to commit `next`
/// - `Ok(None)` for a no-op
/// - `Err(_)` for a contained failure
pub type TransitionFn<S, O, Env> =
    Arc<dyn Fn(&S, O) -> BoxedEffect<Option<S>, TransitionError, Env> + Send + Sync>;

/// One cell address in the state x handle dispatch matrix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionKey<N, H> {
    pub state: N,
    pub handle: H,
}

impl<N: Name, H: Name> TransitionKey<N, H> {
    pub fn new(state: N, handle: H) -> Self {
        Self { state, handle }
    }
}

impl<N: Name, H: Name> std::fmt::Display for TransitionKey<N, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -[{}]->", self.state.as_str(), self.handle.as_str())
    }
}

/// Wrap a closure into a [`TransitionFn`].
pub fn transition_fn<S, O, Env, F>(f: F) -> TransitionFn<S, O, Env>
where
    S: StateItem,
    F: Fn(&S, O) -> BoxedEffect<Option<S>, TransitionError, Env> + Send + Sync + 'static,
{
    Arc::new(f)
}
