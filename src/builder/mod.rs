//! Builder API for ergonomic state part construction.
//!
//! Config items declare transitions keyed by state or by handle, the
//! builder assembles them into a [`StatePart`](crate::effects::StatePart),
//! and [`name_enum!`](crate::name_enum) covers closed name vocabularies.

pub mod config;
pub mod error;
pub mod machine;
pub mod macros;

pub use config::{HandleConfigItem, StateConfigItem};
pub use error::BuildError;
pub use machine::StatePartBuilder;

use crate::core::StateItem;
use crate::effects::{transition_fn, TransitionFn};
use stillwater::prelude::*;

/// Transition that always moves to a fixed state, ignoring its options.
///
/// # Example
///
/// ```
/// use storeparts::builder::{goto, StateConfigItem};
/// use storeparts::core::StateItem;
///
/// #[derive(Clone, Debug)]
/// struct Page {
///     state_name: &'static str,
/// }
///
/// impl StateItem for Page {
///     type Name = &'static str;
///     fn state_name(&self) -> &&'static str {
///         &self.state_name
///     }
/// }
///
/// let home: StateConfigItem<Page, &'static str, (), ()> =
///     StateConfigItem::new("home").on_fn("about", goto(Page { state_name: "about" }));
/// assert_eq!(home.handles().len(), 1);
/// ```
pub fn goto<S, O, Env>(target: S) -> TransitionFn<S, O, Env>
where
    S: StateItem,
    O: 'static,
    Env: Clone + Send + Sync + 'static,
{
    transition_fn(move |_state: &S, _options: O| pure(Some(target.clone())).boxed())
}

/// Transition that moves to the state computed by a pure function.
pub fn map_state<S, O, Env, F>(f: F) -> TransitionFn<S, O, Env>
where
    S: StateItem,
    O: 'static,
    Env: Clone + Send + Sync + 'static,
    F: Fn(&S, O) -> S + Send + Sync + 'static,
{
    transition_fn(move |state: &S, options: O| pure(Some(f(state, options))).boxed())
}
