//! Single-purpose state-container primitives.
//!
//! These are the building blocks widget stores compose alongside the
//! state-pattern engine:
//! - [`Observer`]: publish/subscribe notifier (also the engine's notifier)
//! - [`KeyedObserver`]: notifications fanned out per key
//! - [`EntityStore`]: normalized collection keyed by id
//! - [`ReducerStore`]: state plus a pure reducer
//! - [`StrategyPart`]: one named behaviour active at a time

mod entity;
mod observer;
mod observer_key;
mod reducer;
mod strategy;

pub use entity::{Entity, EntityStore};
pub use observer::{Listener, Observer, Subscription};
pub use observer_key::KeyedObserver;
pub use reducer::{Reducer, ReducerStore};
pub use strategy::{StrategyError, StrategyFn, StrategyPart};
