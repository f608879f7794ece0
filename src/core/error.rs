//! Runtime errors raised while firing events.

use super::action::{ActionKind, BoxError};
use super::state::StateName;
use thiserror::Error;

/// Errors that can occur while resolving or firing an event.
///
/// A guard declining a transition is not an error: firing returns
/// `Ok(false)` instead.
#[derive(Debug, Error)]
pub enum FsmError {
    #[error("event '{event}' cannot transition from '{state}'")]
    InvalidTransition { event: String, state: StateName },

    #[error("unknown event '{event}'")]
    UnknownEvent { event: String },

    #[error("unknown state '{state}'")]
    UnknownState { state: StateName },

    #[error("state machine is delegating to an association that this object does not know about: {association}")]
    MissingAssociation { association: String },

    #[error("object does not handle message '{message}'")]
    UnhandledMessage { message: String },

    #[error("{kind} callback failed: {source}")]
    Callback {
        kind: ActionKind,
        #[source]
        source: BoxError,
    },

    #[error("failed to persist state '{state}': {source}")]
    Persistence {
        state: StateName,
        #[source]
        source: BoxError,
    },
}

impl FsmError {
    /// Whether the error means the event can never apply to the current state.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, FsmError::InvalidTransition { .. })
    }
}
