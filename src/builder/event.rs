//! Builder for constructing events.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Action, BoxError, Event, Transition};

/// Builder for an event and its ordered transitions.
///
/// Transitions keep their declaration order; resolution relies on it.
pub struct EventBuilder<O, A = ()> {
    name: String,
    transitions: Vec<TransitionBuilder<O, A>>,
    prebuilt: Vec<Transition<O, A>>,
    success: Option<Action<O>>,
}

impl<O: 'static, A: 'static> EventBuilder<O, A> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: Vec::new(),
            prebuilt: Vec::new(),
            success: None,
        }
    }

    /// Append a transition.
    pub fn transition(mut self, builder: TransitionBuilder<O, A>) -> Self {
        self.transitions.push(builder);
        self
    }

    /// Shorthand for an unguarded transition without side effects.
    pub fn transitions(self, from: &str, to: &str) -> Self {
        self.transition(TransitionBuilder::new().from(from).to(to))
    }

    /// Hook run after a persisted, non-loopback fire (optional).
    pub fn success(mut self, action: Action<O>) -> Self {
        self.success = Some(action);
        self
    }

    pub fn on_success<F>(self, f: F) -> Self
    where
        F: Fn(&mut O) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.success(Action::function(f))
    }

    /// Build the event.
    pub fn build(self) -> Result<Event<O, A>, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::EmptyEventName);
        }

        let mut transitions = self.prebuilt;
        for builder in self.transitions {
            transitions.extend(builder.build()?);
        }

        Ok(Event {
            name: self.name,
            transitions,
            success: self.success,
        })
    }
}

impl<O: 'static, A: 'static> Event<O, A> {
    /// Start a builder that appends to a copy of this event.
    pub fn extend(&self) -> EventBuilder<O, A> {
        EventBuilder {
            name: self.name.clone(),
            transitions: Vec::new(),
            prebuilt: self.transitions.clone(),
            success: self.success.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateName;

    struct Lease;

    #[test]
    fn empty_name_is_rejected() {
        let result = EventBuilder::<Lease>::new("").transitions("a", "b").build();

        assert!(matches!(result, Err(BuildError::EmptyEventName)));
    }

    #[test]
    fn transition_errors_propagate() {
        let result = EventBuilder::<Lease>::new("renew")
            .transition(TransitionBuilder::new().from("active"))
            .build();

        assert!(matches!(result, Err(BuildError::MissingToState)));
    }

    #[test]
    fn transitions_keep_declaration_order() {
        let event = EventBuilder::<Lease>::new("renew")
            .transitions("active", "renewed")
            .transition(TransitionBuilder::new().from_any(["expired", "grace"]).to("renewed"))
            .build()
            .unwrap();

        let sources: Vec<&str> = event
            .transitions()
            .iter()
            .map(|t| t.from().as_str())
            .collect();
        assert_eq!(sources, vec!["active", "expired", "grace"]);
        assert!(event.success().is_none());
    }

    #[test]
    fn extend_leaves_original_untouched() {
        let base = EventBuilder::<Lease>::new("renew")
            .transitions("active", "renewed")
            .build()
            .unwrap();

        let extended = base.extend().transitions("expired", "renewed").build().unwrap();

        assert_eq!(base.transitions().len(), 1);
        assert_eq!(extended.transitions().len(), 2);
        assert!(extended.transitions_from_state(&StateName::new("expired")));
        assert!(!base.transitions_from_state(&StateName::new("expired")));
    }
}
