//! Statewise: a finite state machine engine for domain objects
//!
//! A host object declares named states, one initial state and named
//! events. Each event carries guarded transitions; firing it from the
//! object's current state picks the first transition whose guard passes,
//! runs the lifecycle hooks in a fixed order and commits the new state,
//! optionally through the host's persistence hook.
//!
//! # Core Concepts
//!
//! - **State**: a named condition with optional enter/exit hooks
//! - **Event**: a named trigger holding ordered, guarded transitions
//! - **Machine**: the immutable state/event definition for one host type
//! - **Instance**: a host object paired with its machine and current state
//!
//! Hooks run in this order on a successful fire, with `exit`, `enter` and
//! `success` skipped when the resolved state equals the current one:
//!
//! `exit(old) -> transition -> enter(new) -> event_fired(old, new) -> success()`
//!
//! # Example
//!
//! ```rust
//! use statewise::builder::{EventBuilder, MachineBuilder, TransitionBuilder};
//! use statewise::core::{FsmError, Stateful};
//! use statewise::machine::Instance;
//! use std::sync::Arc;
//!
//! struct Order;
//! impl Stateful for Order {}
//!
//! let machine = MachineBuilder::<Order>::new()
//!     .states(["pending", "shipped", "cancelled"])
//!     .event(EventBuilder::new("ship").transitions("pending", "shipped"))
//!     .unwrap()
//!     .event(
//!         EventBuilder::new("cancel")
//!             .transition(TransitionBuilder::new().from_any(["pending", "shipped"]).to("cancelled")),
//!     )
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let mut order = Instance::new(Arc::new(machine), Order);
//! assert!(order.is_in_state("pending"));
//!
//! assert!(order.fire_event("ship", true, &()).unwrap());
//! assert!(matches!(
//!     order.fire_event("ship", true, &()),
//!     Err(FsmError::InvalidTransition { .. })
//! ));
//! assert!(order.fire_event("cancel", true, &()).unwrap());
//! assert!(order.is_in_state("cancelled"));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, EventBuilder, MachineBuilder, TransitionBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use core::{Action, FsmError, Guard, State, StateName, Stateful};
pub use machine::{Instance, Machine};
