//! Serializable outline of a machine definition.
//!
//! Hooks and guards are closures and cannot be serialized; a blueprint
//! keeps the shape of the machine (states, events, transitions) and flags
//! where hooks are attached. Useful for diagnostics and diagrams.
//!
//! ```json
//! {
//!   "initial": "pending",
//!   "states": [{"name": "pending", "has_enter": false, "has_exit": false}],
//!   "events": [
//!     {"name": "ship", "has_success": false,
//!      "transitions": [{"from": "pending", "to": ["shipped"], "guarded": false}]}
//!   ]
//! }
//! ```

use super::definition::Machine;
use crate::core::{ActionKind, Event, State, StateName, Transition};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    pub initial: StateName,
    pub states: Vec<StateBlueprint>,
    pub events: Vec<EventBlueprint>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBlueprint {
    pub name: StateName,
    pub has_enter: bool,
    pub has_exit: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBlueprint {
    pub name: String,
    pub has_success: bool,
    pub transitions: Vec<TransitionBlueprint>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionBlueprint {
    pub from: StateName,
    pub to: Vec<StateName>,
    pub guarded: bool,
}

impl<O> From<&State<O>> for StateBlueprint {
    fn from(state: &State<O>) -> Self {
        Self {
            name: state.name().clone(),
            has_enter: state.action(ActionKind::Enter).is_some(),
            has_exit: state.action(ActionKind::Exit).is_some(),
        }
    }
}

impl<O, A> From<&Transition<O, A>> for TransitionBlueprint {
    fn from(transition: &Transition<O, A>) -> Self {
        Self {
            from: transition.from().clone(),
            to: transition.to().to_vec(),
            guarded: transition.is_guarded(),
        }
    }
}

impl<O, A> From<&Event<O, A>> for EventBlueprint {
    fn from(event: &Event<O, A>) -> Self {
        Self {
            name: event.name().to_string(),
            has_success: event.success().is_some(),
            transitions: event.transitions().iter().map(Into::into).collect(),
        }
    }
}

impl<O, A> Machine<O, A> {
    /// Outline of this machine without its hooks and guards.
    pub fn blueprint(&self) -> Blueprint {
        Blueprint {
            initial: self.initial.clone(),
            states: self.states.iter().map(Into::into).collect(),
            events: self.events.iter().map(Into::into).collect(),
        }
    }
}

impl Blueprint {
    /// Pretty-printed JSON, in the layout shown in the module docs.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
