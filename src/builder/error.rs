//! Errors raised while assembling a state part.

use crate::effects::StatePartError;
use thiserror::Error;

/// Errors that can occur when building a [`StatePart`](crate::effects::StatePart).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Initial state '{name}' is not in the state name list")]
    UnknownInitialState { name: String },

    #[error(transparent)]
    StatePart(#[from] StatePartError),
}
