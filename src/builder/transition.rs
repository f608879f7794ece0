//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{BoxError, Guard, StateName, Stateful, Transition, TransitionAction};
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
///
/// Several `from` states expand into one transition per source, all
/// sharing the same targets, guard and side effect.
pub struct TransitionBuilder<O, A = ()> {
    from: Vec<StateName>,
    to: Vec<StateName>,
    guard: Option<Guard<O, A>>,
    on_transition: Option<TransitionAction<O, A>>,
}

impl<O: 'static, A: 'static> TransitionBuilder<O, A> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: Vec::new(),
            to: Vec::new(),
            guard: None,
            on_transition: None,
        }
    }

    /// Add a source state (at least one required).
    pub fn from(mut self, state: impl Into<StateName>) -> Self {
        self.from.push(state.into());
        self
    }

    /// Add several source states.
    pub fn from_any<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateName>,
    {
        self.from.extend(states.into_iter().map(Into::into));
        self
    }

    /// Add a candidate target state (at least one required).
    pub fn to(mut self, state: impl Into<StateName>) -> Self {
        self.to.push(state.into());
        self
    }

    /// Add several candidate targets; the first listed is the default.
    pub fn to_any<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateName>,
    {
        self.to.extend(states.into_iter().map(Into::into));
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<O, A>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&O, &A) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Side effect run when this transition wins (optional).
    pub fn on_transition<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut O, &A) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.on_transition = Some(Arc::new(action));
        self
    }

    /// Build one transition per source state.
    pub fn build(self) -> Result<Vec<Transition<O, A>>, BuildError> {
        if self.from.is_empty() {
            return Err(BuildError::MissingFromState);
        }
        if self.to.is_empty() {
            return Err(BuildError::MissingToState);
        }

        Ok(self
            .from
            .into_iter()
            .map(|from| Transition {
                from,
                to: self.to.clone(),
                guard: self.guard.clone(),
                on_transition: self.on_transition.clone(),
            })
            .collect())
    }
}

impl<O: Stateful + 'static, A: 'static> TransitionBuilder<O, A> {
    /// Send a named message to the object when this transition wins.
    pub fn on_transition_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.on_transition(move |object: &mut O, _args: &A| object.receive(&message))
    }
}

impl<O: 'static, A: 'static> Default for TransitionBuilder<O, A> {
    fn default() -> Self {
        Self::new()
    }
}
