//! Events: named, ordered collections of transitions.
//!
//! Resolution walks the transitions declared from the current state in
//! declaration order and picks the first whose guard passes. When a target
//! is requested, only transitions listing that target take part.

use super::action::{Action, ActionKind};
use super::error::FsmError;
use super::host::Stateful;
use super::state::StateName;
use super::transition::Transition;
use std::fmt;

/// A named trigger carrying one or more guarded transitions.
pub struct Event<O, A = ()> {
    pub(crate) name: String,
    pub(crate) transitions: Vec<Transition<O, A>>,
    pub(crate) success: Option<Action<O>>,
}

impl<O, A> Event<O, A> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transitions(&self) -> &[Transition<O, A>] {
        &self.transitions
    }

    pub fn success(&self) -> Option<&Action<O>> {
        self.success.as_ref()
    }

    /// Whether any transition starts at `state`.
    pub fn transitions_from_state(&self, state: &StateName) -> bool {
        self.transitions.iter().any(|t| t.from == *state)
    }

    /// Resolve the next state without running any transition side effect.
    ///
    /// Returns `None` when nothing is declared from `current` or every
    /// applicable guard declines.
    pub fn get_next_state(
        &self,
        object: &O,
        current: &StateName,
        to_state: Option<&StateName>,
        args: &A,
    ) -> Option<StateName> {
        self.resolve(object, current, to_state, args)
            .map(|(_, next)| next)
    }

    /// Resolve the next state and run the winning transition's side effect.
    ///
    /// Firing from a state the event declares nothing for is an
    /// [`FsmError::InvalidTransition`]; a declined guard is `Ok(None)`.
    pub fn fire(
        &self,
        object: &mut O,
        current: &StateName,
        to_state: Option<&StateName>,
        args: &A,
    ) -> Result<Option<StateName>, FsmError> {
        if !self.transitions_from_state(current) {
            tracing::warn!(event = %self.name, state = %current, "invalid transition");
            return Err(FsmError::InvalidTransition {
                event: self.name.clone(),
                state: current.clone(),
            });
        }

        let Some((index, next)) = self.resolve(object, current, to_state, args) else {
            return Ok(None);
        };
        self.transitions[index].execute(object, args)?;
        Ok(Some(next))
    }

    fn resolve(
        &self,
        object: &O,
        current: &StateName,
        to_state: Option<&StateName>,
        args: &A,
    ) -> Option<(usize, StateName)> {
        self.transitions
            .iter()
            .enumerate()
            .filter(|(_, t)| t.from == *current)
            .filter(|(_, t)| to_state.map_or(true, |to| t.targets(to)))
            .find(|(_, t)| t.perform(object, args))
            .and_then(|(index, t)| {
                to_state
                    .or_else(|| t.to.first())
                    .map(|next| (index, next.clone()))
            })
    }
}

impl<O: Stateful, A> Event<O, A> {
    /// Run the event's success hook, if any.
    pub fn call_success(&self, object: &mut O) -> Result<(), FsmError> {
        let Some(action) = &self.success else {
            return Ok(());
        };
        tracing::trace!(event = %self.name, "invoking success hook");
        action
            .invoke(object)
            .map_err(|source| FsmError::Callback {
                kind: ActionKind::Success,
                source,
            })
    }
}

impl<O, A> Clone for Event<O, A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            transitions: self.transitions.clone(),
            success: self.success.clone(),
        }
    }
}

impl<O, A> fmt::Debug for Event<O, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("transitions", &self.transitions)
            .field("success", &self.success)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Guard;
    use std::sync::Arc;

    #[derive(Default)]
    struct Job {
        executed: Vec<&'static str>,
        approved: bool,
    }

    impl Stateful for Job {}

    fn edge(from: &str, to: &[&str], tag: &'static str) -> Transition<Job, ()> {
        Transition {
            from: StateName::new(from),
            to: to.iter().map(|s| StateName::new(*s)).collect(),
            guard: None,
            on_transition: Some(Arc::new(move |job: &mut Job, _: &()| {
                job.executed.push(tag);
                Ok(())
            })),
        }
    }

    fn guarded(mut t: Transition<Job, ()>, guard: fn(&Job, &()) -> bool) -> Transition<Job, ()> {
        t.guard = Some(Guard::new(guard));
        t
    }

    fn event(transitions: Vec<Transition<Job, ()>>) -> Event<Job, ()> {
        Event {
            name: "advance".to_string(),
            transitions,
            success: None,
        }
    }

    fn name(s: &str) -> StateName {
        StateName::new(s)
    }

    #[test]
    fn transitions_from_state_checks_sources() {
        let e = event(vec![edge("a", &["b"], "ab"), edge("b", &["c"], "bc")]);

        assert!(e.transitions_from_state(&name("a")));
        assert!(e.transitions_from_state(&name("b")));
        assert!(!e.transitions_from_state(&name("c")));
    }

    #[test]
    fn next_state_is_first_listed_target() {
        let e = event(vec![edge("a", &["b", "c"], "abc")]);
        let job = Job::default();

        assert_eq!(e.get_next_state(&job, &name("a"), None, &()), Some(name("b")));
    }

    #[test]
    fn requested_target_filters_transitions() {
        let e = event(vec![edge("a", &["b"], "ab"), edge("a", &["c", "d"], "acd")]);
        let mut job = Job::default();

        let next = e.fire(&mut job, &name("a"), Some(&name("d")), &()).unwrap();

        assert_eq!(next, Some(name("d")));
        assert_eq!(job.executed, vec!["acd"]);
    }

    #[test]
    fn requested_target_not_offered_resolves_nothing() {
        let e = event(vec![edge("a", &["b"], "ab")]);
        let mut job = Job::default();

        let next = e.fire(&mut job, &name("a"), Some(&name("z")), &()).unwrap();

        assert_eq!(next, None);
        assert!(job.executed.is_empty());
    }

    #[test]
    fn first_passing_guard_wins() {
        let e = event(vec![
            guarded(edge("a", &["b"], "ab"), |_, _| false),
            guarded(edge("a", &["c"], "ac"), |_, _| true),
            edge("a", &["d"], "ad"),
        ]);
        let mut job = Job::default();

        let next = e.fire(&mut job, &name("a"), None, &()).unwrap();

        assert_eq!(next, Some(name("c")));
        assert_eq!(job.executed, vec!["ac"]);
    }

    #[test]
    fn guards_see_object_state() {
        let e = event(vec![
            guarded(edge("a", &["approved"], "yes"), |job, _| job.approved),
            edge("a", &["rejected"], "no"),
        ]);
        let approved = Job {
            approved: true,
            ..Job::default()
        };

        assert_eq!(
            e.get_next_state(&approved, &name("a"), None, &()),
            Some(name("approved"))
        );
        assert_eq!(
            e.get_next_state(&Job::default(), &name("a"), None, &()),
            Some(name("rejected"))
        );
    }

    #[test]
    fn get_next_state_without_source_is_none() {
        let e = event(vec![edge("a", &["b"], "ab")]);

        assert_eq!(e.get_next_state(&Job::default(), &name("x"), None, &()), None);
    }

    #[test]
    fn get_next_state_runs_no_side_effects() {
        let e = event(vec![edge("a", &["b"], "ab")]);
        let job = Job::default();

        let first = e.get_next_state(&job, &name("a"), None, &());
        let second = e.get_next_state(&job, &name("a"), None, &());

        assert_eq!(first, second);
        assert!(job.executed.is_empty());
    }

    #[test]
    fn fire_without_source_is_invalid_transition() {
        let e = event(vec![edge("a", &["b"], "ab")]);
        let mut job = Job::default();

        let err = e.fire(&mut job, &name("b"), None, &()).unwrap_err();

        assert!(err.is_invalid_transition());
        assert_eq!(err.to_string(), "event 'advance' cannot transition from 'b'");
    }

    #[test]
    fn declined_guards_return_none() {
        let e = event(vec![guarded(edge("a", &["b"], "ab"), |_, _| false)]);
        let mut job = Job::default();

        assert_eq!(e.fire(&mut job, &name("a"), None, &()).unwrap(), None);
        assert!(job.executed.is_empty());
    }

    #[test]
    fn call_success_without_hook_is_noop() {
        let e = event(vec![edge("a", &["b"], "ab")]);
        let mut job = Job::default();

        e.call_success(&mut job).unwrap();
    }

    #[test]
    fn call_success_runs_hook() {
        let mut e = event(vec![edge("a", &["b"], "ab")]);
        e.success = Some(Action::function(|job: &mut Job| {
            job.executed.push("success");
            Ok(())
        }));
        let mut job = Job::default();

        e.call_success(&mut job).unwrap();

        assert_eq!(job.executed, vec!["success"]);
    }
}
