//! Guarded edges between states.

use super::action::{ActionKind, BoxError};
use super::error::FsmError;
use super::guard::Guard;
use super::state::StateName;
use std::fmt;
use std::sync::Arc;

/// Side effect run once when a transition wins resolution.
pub type TransitionAction<O, A> = Arc<dyn Fn(&mut O, &A) -> Result<(), BoxError> + Send + Sync>;

/// A guarded edge from one state to one or more candidate targets.
///
/// Targets are ordered: without an explicit target the first one wins.
pub struct Transition<O, A = ()> {
    pub(crate) from: StateName,
    pub(crate) to: Vec<StateName>,
    pub(crate) guard: Option<Guard<O, A>>,
    pub(crate) on_transition: Option<TransitionAction<O, A>>,
}

impl<O, A> Transition<O, A> {
    pub fn from(&self) -> &StateName {
        &self.from
    }

    pub fn to(&self) -> &[StateName] {
        &self.to
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    pub fn targets(&self, state: &StateName) -> bool {
        self.to.contains(state)
    }

    /// Evaluate the guard (pure). Unguarded transitions always pass.
    pub fn perform(&self, object: &O, args: &A) -> bool {
        self.guard.as_ref().map_or(true, |g| g.check(object, args))
    }

    /// Run the transition side effect, if any.
    pub fn execute(&self, object: &mut O, args: &A) -> Result<(), FsmError> {
        let Some(action) = &self.on_transition else {
            return Ok(());
        };
        tracing::trace!(from = %self.from, "invoking transition hook");
        action(object, args).map_err(|source| FsmError::Callback {
            kind: ActionKind::Transition,
            source,
        })
    }
}

impl<O, A> Clone for Transition<O, A> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            guard: self.guard.clone(),
            on_transition: self.on_transition.clone(),
        }
    }
}

impl<O, A> fmt::Debug for Transition<O, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("guarded", &self.guard.is_some())
            .field("on_transition", &self.on_transition.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        hits: u32,
        allow: bool,
    }

    fn transition(guarded: bool) -> Transition<Counter, u32> {
        Transition {
            from: StateName::new("idle"),
            to: vec![StateName::new("busy"), StateName::new("paused")],
            guard: guarded.then(|| Guard::new(|c: &Counter, _: &u32| c.allow)),
            on_transition: Some(Arc::new(|c: &mut Counter, step: &u32| {
                c.hits += step;
                Ok(())
            })),
        }
    }

    #[test]
    fn unguarded_transition_always_performs() {
        let counter = Counter {
            hits: 0,
            allow: false,
        };

        assert!(transition(false).perform(&counter, &1));
    }

    #[test]
    fn guard_controls_perform() {
        let t = transition(true);

        assert!(t.perform(&Counter { hits: 0, allow: true }, &1));
        assert!(!t.perform(&Counter { hits: 0, allow: false }, &1));
    }

    #[test]
    fn perform_has_no_side_effects() {
        let t = transition(true);
        let counter = Counter {
            hits: 0,
            allow: true,
        };

        t.perform(&counter, &3);
        t.perform(&counter, &3);

        assert_eq!(counter.hits, 0);
    }

    #[test]
    fn execute_passes_arguments() {
        let t = transition(false);
        let mut counter = Counter {
            hits: 1,
            allow: true,
        };

        t.execute(&mut counter, &4).unwrap();

        assert_eq!(counter.hits, 5);
    }

    #[test]
    fn targets_checks_candidate_list() {
        let t = transition(false);

        assert!(t.targets(&StateName::new("busy")));
        assert!(t.targets(&StateName::new("paused")));
        assert!(!t.targets(&StateName::new("idle")));
    }

    #[test]
    fn execute_failure_is_tagged_as_transition_hook() {
        let t: Transition<Counter, u32> = Transition {
            from: StateName::new("idle"),
            to: vec![StateName::new("busy")],
            guard: None,
            on_transition: Some(Arc::new(|_: &mut Counter, _: &u32| Err("jammed".into()))),
        };
        let mut counter = Counter {
            hits: 0,
            allow: true,
        };

        let err = t.execute(&mut counter, &1).unwrap_err();

        assert!(matches!(
            err,
            FsmError::Callback {
                kind: ActionKind::Transition,
                ..
            }
        ));
    }
}
