//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::builder::event::EventBuilder;
use crate::core::{Event, State, StateName};
use crate::machine::Machine;

/// Builder for constructing machines with a fluent API.
///
/// The first declared state becomes the initial state unless
/// [`initial`](Self::initial) names another one. Re-declaring a state or
/// an event that already exists is ignored; the first declaration wins.
pub struct MachineBuilder<O, A = ()> {
    states: Vec<State<O>>,
    events: Vec<Event<O, A>>,
    initial: Option<StateName>,
}

impl<O: 'static, A: 'static> MachineBuilder<O, A> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            events: Vec::new(),
            initial: None,
        }
    }

    /// Start from an independent copy of `parent`.
    pub fn derive(parent: &Machine<O, A>) -> Self {
        Self {
            states: parent.states.clone(),
            events: parent.events.clone(),
            initial: Some(parent.initial.clone()),
        }
    }

    /// Declare a state, by bare name or as a full [`State`].
    pub fn state(mut self, state: impl Into<State<O>>) -> Self {
        let state = state.into();
        if self.states.contains(&state) {
            tracing::debug!(state = %state.name(), "ignoring duplicate state declaration");
            return self;
        }
        if self.initial.is_none() {
            self.initial = Some(state.name().clone());
        }
        self.states.push(state);
        self
    }

    /// Declare several states by name.
    pub fn states<I, S>(self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State<O>>,
    {
        states
            .into_iter()
            .fold(self, |builder, state| builder.state(state))
    }

    /// Set the initial state explicitly.
    pub fn initial(mut self, state: impl Into<StateName>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Declare an event using a builder.
    /// Returns an error if the builder fails validation.
    pub fn event(self, builder: EventBuilder<O, A>) -> Result<Self, BuildError> {
        let event = builder.build()?;
        Ok(self.add_event(event))
    }

    /// Declare a pre-built event.
    pub fn add_event(mut self, event: Event<O, A>) -> Self {
        if self.events.iter().any(|e| e.name() == event.name()) {
            tracing::debug!(event = event.name(), "ignoring duplicate event declaration");
            return self;
        }
        self.events.push(event);
        self
    }

    /// Append to an already declared event, or declare it if missing.
    pub fn extend_event<F>(mut self, name: &str, f: F) -> Result<Self, BuildError>
    where
        F: FnOnce(EventBuilder<O, A>) -> EventBuilder<O, A>,
    {
        match self.events.iter().position(|e| e.name() == name) {
            Some(index) => {
                let extended = f(self.events[index].extend()).build()?;
                self.events[index] = extended;
                Ok(self)
            }
            None => self.event(f(EventBuilder::new(name))),
        }
    }

    /// Build the machine.
    /// Returns an error if no initial state can be determined.
    pub fn build(self) -> Result<Machine<O, A>, BuildError> {
        if self.states.iter().any(|s| s.name().as_str().is_empty()) {
            return Err(BuildError::EmptyStateName);
        }

        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        if !self.states.iter().any(|s| *s == initial) {
            return Err(BuildError::UnknownInitialState(initial.to_string()));
        }

        Ok(Machine {
            states: self.states,
            events: self.events,
            initial,
        })
    }
}

impl<O: 'static, A: 'static> Default for MachineBuilder<O, A> {
    fn default() -> Self {
        Self::new()
    }
}
