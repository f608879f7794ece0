//! Builder API for declaring machines.
//!
//! Machines are declared with fluent builders instead of registration
//! calls on a host type. The [`event_methods!`](crate::event_methods)
//! macro generates a typed method per event on top of the generic
//! `fire_event` entry point.

pub mod error;
pub mod event;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use event::EventBuilder;
pub use machine::MachineBuilder;
pub use transition::TransitionBuilder;
