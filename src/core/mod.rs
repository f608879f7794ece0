//! Core state machine types.
//!
//! This module contains the data model and the transition-matching logic:
//! - States and their enter/exit hooks
//! - Guards deciding whether a transition may apply
//! - Events resolving the next state from the current one
//! - Immutable history of committed transitions
//!
//! Resolution (`Event::get_next_state`) is pure; only `Event::fire` and
//! the hook invocations run side effects.

mod action;
mod error;
mod event;
mod guard;
mod history;
mod host;
mod state;
mod transition;

pub use action::{Action, ActionFn, ActionKind, BoxError};
pub use error::FsmError;
pub use event::Event;
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use host::{ActiveState, Stateful};
pub use state::{State, StateName};
pub use transition::{Transition, TransitionAction};
