//! Effectful side of the state-pattern engine, on Stillwater 0.11.0.
//!
//! The name registry and the policy in [`crate::core`] are pure data. This
//! module holds the pieces that run effects:
//!
//! - **Transitions**: `(snapshot, options) -> BoxedEffect<Option<S>, _, Env>`
//! - **Table**: two-level `state -> handle -> transition` dispatch matrix
//! - **Engine**: [`StatePart`], which validates, dispatches, commits and notifies
//!
//! # Zero-Cost Abstractions
//!
//! Following Stillwater 0.11.0 conventions:
//! - The table stores `BoxedEffect` producers (one allocation per firing)
//! - Use free-standing constructors: `pure()`, `fail()`, `from_fn()`

mod machine;
mod table;
mod transition;

pub use machine::{HandleOutcome, StatePart, StatePartError, StatePartOptions};
pub use table::TransitionTable;
pub use transition::{transition_fn, TransitionError, TransitionFn, TransitionKey};
