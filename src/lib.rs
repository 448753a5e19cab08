//! Storeparts: composable state containers for UI widget stores
//!
//! The centrepiece is [`StatePart`], a dynamic finite-state machine in the
//! state pattern. Its state and handle vocabularies live in a runtime name
//! registry, its transitions live in a sparse two-level table, and each
//! transition is a Stillwater effect that may do I/O before yielding the
//! next state. Every committed state is broadcast to subscribers.
//!
//! # Core Concepts
//!
//! - **Names**: state and handle identifiers via the `Name` trait
//! - **State items**: snapshots tagged with a state name via `StateItem`
//! - **Transitions**: `(snapshot, options) -> effect yielding Option<next>`
//! - **Parts**: observer, keyed observer, entity store, reducer store and
//!   strategy dispatcher for composing widget stores
//!
//! # Example
//!
//! ```rust
//! use storeparts::builder::{StateConfigItem, StatePartBuilder};
//! use storeparts::core::StateItem;
//! use storeparts::name_enum;
//! use stillwater::prelude::*;
//!
//! name_enum! {
//!     pub enum Phase {
//!         Idle,
//!         Loading,
//!         Ready,
//!     }
//! }
//!
//! name_enum! {
//!     pub enum Event {
//!         Fetch,
//!         Loaded,
//!     }
//! }
//!
//! #[derive(Clone, Debug)]
//! struct Feed {
//!     state_name: Phase,
//!     items: Vec<String>,
//! }
//!
//! impl StateItem for Feed {
//!     type Name = Phase;
//!     fn state_name(&self) -> &Phase {
//!         &self.state_name
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut feed = StatePartBuilder::<Feed, Event, Vec<String>>::new()
//!     .initial(Feed { state_name: Phase::Idle, items: vec![] })
//!     .state_names(Phase::ALL.iter().copied())
//!     .handle_names(Event::ALL.iter().copied())
//!     .state_config(StateConfigItem::new(Phase::Idle).on(Event::Fetch, |s: &Feed, _o| {
//!         pure(Some(Feed { state_name: Phase::Loading, ..s.clone() })).boxed()
//!     }))
//!     .state_config(StateConfigItem::new(Phase::Loading).on(Event::Loaded, |_s: &Feed, items| {
//!         pure(Some(Feed { state_name: Phase::Ready, items })).boxed()
//!     }))
//!     .build()
//!     .unwrap();
//!
//! feed.handle(Event::Fetch, vec![]).await.unwrap();
//! feed.handle(Event::Loaded, vec!["hello".to_string()]).await.unwrap();
//! assert_eq!(feed.get_state().state_name, Phase::Ready);
//! assert_eq!(feed.get_state().items.len(), 1);
//! # });
//! ```

pub mod builder;
pub mod core;
pub mod effects;
pub mod parts;

// Re-export commonly used types
pub use builder::{BuildError, HandleConfigItem, StateConfigItem, StatePartBuilder};
pub use core::{Name, NamePolicy, NameRegistry, StateItem};
pub use effects::{
    HandleOutcome, StatePart, StatePartError, StatePartOptions, TransitionError, TransitionFn,
    TransitionKey, TransitionTable,
};
pub use parts::{EntityStore, KeyedObserver, Observer, ReducerStore, StrategyPart, Subscription};
