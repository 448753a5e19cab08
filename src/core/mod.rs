//! Core naming types for the state-pattern engine.
//!
//! This module contains the pure, synchronous pieces of the engine:
//! - Name and state-item traits
//! - The registry of live state and handle names
//! - The policy for unknown names
//!
//! Nothing here performs effects; the effectful engine lives in
//! [`crate::effects`].

mod policy;
mod registry;
mod state;

pub use policy::NamePolicy;
pub use registry::NameRegistry;
pub use state::{Name, StateItem};
