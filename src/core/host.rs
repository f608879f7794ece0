//! Capabilities a host object opts into.
//!
//! Every method has a no-op default, so `impl Stateful for Order {}` is a
//! complete implementation for an object that only lives in memory.

use super::action::BoxError;
use super::error::FsmError;
use super::state::StateName;

/// Host object a machine is attached to.
///
/// # Example
///
/// ```rust
/// use statewise::core::{BoxError, StateName, Stateful};
///
/// struct Ticket {
///     column: Option<String>,
/// }
///
/// impl Stateful for Ticket {
///     fn read_state(&self) -> Option<StateName> {
///         self.column.as_deref().map(StateName::from)
///     }
///
///     fn write_state(&mut self, state: &StateName) -> Result<(), BoxError> {
///         self.column = Some(state.to_string());
///         Ok(())
///     }
/// }
/// ```
pub trait Stateful {
    /// Persisted state, read lazily on first access.
    fn read_state(&self) -> Option<StateName> {
        None
    }

    /// Write the state through to durable storage on persisted fires.
    fn write_state(&mut self, _state: &StateName) -> Result<(), BoxError> {
        Ok(())
    }

    /// Observe an in-memory state change. Runs on every commit.
    fn write_state_without_persistence(&mut self, _state: &StateName) {}

    /// Called after a transition resolves, before it is committed.
    fn event_fired(&mut self, _from: &StateName, _to: &StateName) {}

    /// Called when every guard for the current state declined.
    fn event_failed(&mut self, _event: &str) {}

    /// Handle a named hook message.
    fn receive(&mut self, message: &str) -> Result<(), BoxError> {
        Err(FsmError::UnhandledMessage {
            message: message.to_string(),
        }
        .into())
    }

    /// Associated machine a `delegate_to_<name>` state hands off to.
    fn association(&self, _name: &str) -> Option<&dyn ActiveState> {
        None
    }
}

/// Anything that can report the state it is actively in.
pub trait ActiveState {
    fn active_state(&self) -> Result<StateName, FsmError>;
}
