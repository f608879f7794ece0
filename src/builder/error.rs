//! Build errors for machine, event and transition builders.

use thiserror::Error;

/// Errors that can occur when building machines, events and transitions.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Declare at least one state or call .initial(state)")]
    MissingInitialState,

    #[error("Initial state '{0}' is not a declared state")]
    UnknownInitialState(String),

    #[error("State name must not be empty")]
    EmptyStateName,

    #[error("Event name must not be empty")]
    EmptyEventName,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,
}
