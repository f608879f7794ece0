//! Machines and the instances they drive.
//!
//! - [`Machine`]: immutable state/event definition, shared between instances
//! - [`Instance`]: a host object plus its current state; fires events
//! - [`Blueprint`]: serializable outline of a machine
//! - [`DefinitionViolation`]: problems reported by [`Machine::validate`]

mod blueprint;
mod definition;
mod instance;
mod validation;

pub use blueprint::{Blueprint, EventBlueprint, StateBlueprint, TransitionBlueprint};
pub use definition::Machine;
pub use instance::Instance;
pub use validation::DefinitionViolation;
