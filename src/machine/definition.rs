//! Machine definitions: states, events and the initial state.

use crate::builder::MachineBuilder;
use crate::core::{Event, State, StateName};
use std::fmt;

/// Complete state/event definition for one host type.
///
/// A machine is immutable once built. Share it behind an `Arc` between
/// instances; extend it with [`Machine::derive`], which starts a builder
/// from an independent copy.
pub struct Machine<O, A = ()> {
    pub(crate) states: Vec<State<O>>,
    pub(crate) events: Vec<Event<O, A>>,
    pub(crate) initial: StateName,
}

impl<O, A> Machine<O, A> {
    /// Declared states, in declaration order.
    pub fn states(&self) -> &[State<O>] {
        &self.states
    }

    /// Look up the definition for a state name.
    pub fn state(&self, name: &StateName) -> Option<&State<O>> {
        self.states.iter().find(|s| *s == name)
    }

    pub fn has_state(&self, name: &StateName) -> bool {
        self.state(name).is_some()
    }

    /// Declared events, in declaration order.
    pub fn events(&self) -> &[Event<O, A>] {
        &self.events
    }

    /// Look up an event by name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statewise::builder::{EventBuilder, MachineBuilder};
    ///
    /// struct Door;
    ///
    /// let machine = MachineBuilder::<Door>::new()
    ///     .states(["closed", "open"])
    ///     .event(EventBuilder::new("open").transitions("closed", "open"))
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(machine.event("open").is_some());
    /// assert!(machine.event("slam").is_none());
    /// ```
    pub fn event(&self, name: &str) -> Option<&Event<O, A>> {
        self.events.iter().find(|e| e.name() == name)
    }

    /// State reported by instances that have nothing persisted yet.
    pub fn initial_state(&self) -> &StateName {
        &self.initial
    }

    /// Names of the events with at least one transition from `state`.
    pub fn events_for_state(&self, state: &StateName) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.transitions_from_state(state))
            .map(|e| e.name())
            .collect()
    }

    /// Start a builder from a copy of this machine.
    ///
    /// Declarations on the builder never reach `self`.
    pub fn derive(&self) -> MachineBuilder<O, A>
    where
        O: 'static,
        A: 'static,
    {
        MachineBuilder::derive(self)
    }
}

impl<O, A> Clone for Machine<O, A> {
    fn clone(&self) -> Self {
        Self {
            states: self.states.clone(),
            events: self.events.clone(),
            initial: self.initial.clone(),
        }
    }
}

impl<O, A> fmt::Debug for Machine<O, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("initial", &self.initial)
            .field("states", &self.states)
            .field("events", &self.events)
            .finish()
    }
}
