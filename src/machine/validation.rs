//! Definition checks that accumulate every problem in one pass.
//!
//! Firing never runs these checks: a transition naming an undeclared state
//! only fails once it is fired. Call [`Machine::validate`] explicitly, for
//! example in a test, to catch such references up front. The initial state
//! is not checked here; `MachineBuilder::build` already rejects an
//! undeclared one.

use super::definition::Machine;
use crate::core::StateName;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A problem found in a machine definition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DefinitionViolation {
    #[error("Event '{event}' transitions from undeclared state '{state}'")]
    UndeclaredSource { event: String, state: StateName },

    #[error("Event '{event}' transitions to undeclared state '{state}'")]
    UndeclaredTarget { event: String, state: StateName },

    #[error("Event '{event}' declares no transitions")]
    EmptyEvent { event: String },
}

impl<O, A> Machine<O, A> {
    /// Check the definition, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<DefinitionViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<DefinitionViolation>>> =
            vec![Validation::success(())];

        for event in &self.events {
            if event.transitions().is_empty() {
                checks.push(Validation::fail(DefinitionViolation::EmptyEvent {
                    event: event.name().to_string(),
                }));
            }

            for transition in event.transitions() {
                let from = transition.from();
                checks.push(self.require_declared(from, || {
                    DefinitionViolation::UndeclaredSource {
                        event: event.name().to_string(),
                        state: from.clone(),
                    }
                }));

                for to in transition.to() {
                    checks.push(self.require_declared(to, || {
                        DefinitionViolation::UndeclaredTarget {
                            event: event.name().to_string(),
                            state: to.clone(),
                        }
                    }));
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    fn require_declared<F>(
        &self,
        state: &StateName,
        violation: F,
    ) -> Validation<(), NonEmptyVec<DefinitionViolation>>
    where
        F: FnOnce() -> DefinitionViolation,
    {
        if self.has_state(state) {
            Validation::success(())
        } else {
            Validation::fail(violation())
        }
    }
}
