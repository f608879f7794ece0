//! Property-based tests for resolution and firing.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated machines.

use proptest::prelude::*;
use statewise::builder::{EventBuilder, MachineBuilder, TransitionBuilder};
use statewise::core::{Action, BoxError, State, StateName, Stateful};
use statewise::machine::{Instance, Machine};
use std::sync::Arc;

const STATES: [&str; 4] = ["a", "b", "c", "d"];

#[derive(Default)]
struct Probe {
    hooks: Vec<String>,
}

impl Stateful for Probe {
    fn receive(&mut self, message: &str) -> Result<(), BoxError> {
        self.hooks.push(message.to_string());
        Ok(())
    }
}

prop_compose! {
    fn arbitrary_state()(index in 0..STATES.len()) -> &'static str {
        STATES[index]
    }
}

prop_compose! {
    fn arbitrary_guards()(
        guards in prop::collection::vec((arbitrary_state(), any::<bool>()), 1..6)
    ) -> Vec<(&'static str, bool)> {
        guards
    }
}

fn hooked(name: &str) -> State<Probe> {
    State::new(name)
        .on_enter(Action::message(format!("enter({name})")))
        .on_exit(Action::message(format!("exit({name})")))
}

/// Machine with one event whose transitions all start at "a".
fn machine(guards: &[(&'static str, bool)]) -> Arc<Machine<Probe>> {
    let event = guards
        .iter()
        .fold(EventBuilder::new("go"), |event, &(to, allow)| {
            event.transition(
                TransitionBuilder::new()
                    .from("a")
                    .to(to)
                    .when(move |_: &Probe, _: &()| allow)
                    .on_transition_message(format!("transition({to})")),
            )
        });
    let builder = STATES
        .iter()
        .fold(MachineBuilder::new(), |builder, name| builder.state(hooked(name)));
    Arc::new(builder.event(event).unwrap().build().unwrap())
}

fn expected_target(guards: &[(&'static str, bool)]) -> Option<&'static str> {
    guards.iter().find(|(_, allow)| *allow).map(|(to, _)| *to)
}

proptest! {
    #[test]
    fn first_passing_guard_wins(guards in arbitrary_guards()) {
        let mut instance = Instance::new(machine(&guards), Probe::default());

        let fired = instance.fire_event("go", false, &()).unwrap();

        match expected_target(&guards) {
            Some(to) => {
                prop_assert!(fired);
                prop_assert!(instance.is_in_state(to));
            }
            None => {
                prop_assert!(!fired);
                prop_assert!(instance.is_in_state("a"));
            }
        }
    }

    #[test]
    fn resolution_is_pure_and_repeatable(guards in arbitrary_guards()) {
        let instance = Instance::new(machine(&guards), Probe::default());

        let first = instance.peek("go", &()).unwrap();
        let second = instance.peek("go", &()).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, expected_target(&guards).map(StateName::new));
        prop_assert!(instance.object().hooks.is_empty());
    }

    #[test]
    fn loopback_never_runs_state_hooks(guards in arbitrary_guards()) {
        let mut instance = Instance::new(machine(&guards), Probe::default());

        instance.fire_event("go", true, &()).unwrap();

        if expected_target(&guards) == Some("a") {
            let hooks = &instance.object().hooks;
            prop_assert!(!hooks.iter().any(|h| h.starts_with("enter") || h.starts_with("exit")));
            prop_assert_eq!(hooks, &vec!["transition(a)".to_string()]);
        }
    }

    #[test]
    fn non_loopback_brackets_transition_with_exit_and_enter(guards in arbitrary_guards()) {
        let mut instance = Instance::new(machine(&guards), Probe::default());

        instance.fire_event("go", false, &()).unwrap();

        if let Some(to) = expected_target(&guards).filter(|to| *to != "a") {
            prop_assert_eq!(
                &instance.object().hooks,
                &vec![
                    "exit(a)".to_string(),
                    format!("transition({to})"),
                    format!("enter({to})"),
                ]
            );
        }
    }

    #[test]
    fn derived_machine_isolation(extra in "[e-z]{1,8}") {
        let parent = machine(&[("b", true)]);

        let child = parent
            .derive()
            .state(extra.as_str())
            .event(EventBuilder::new("extra").transitions("a", extra.as_str()))
            .unwrap()
            .build()
            .unwrap();

        let extra = StateName::new(extra);
        prop_assert!(child.has_state(&extra));
        prop_assert!(child.event("extra").is_some());
        prop_assert!(!parent.has_state(&extra));
        prop_assert!(parent.event("extra").is_none());
        prop_assert_eq!(parent.states().len(), STATES.len());
    }

    #[test]
    fn history_path_tracks_every_commit(fires in 1..10usize) {
        let machine = Arc::new(
            MachineBuilder::<Probe>::new()
                .states(["on", "off"])
                .event(EventBuilder::new("toggle").transitions("on", "off").transitions("off", "on"))
                .unwrap()
                .build()
                .unwrap(),
        );
        let mut instance = Instance::new(machine, Probe::default());

        for _ in 0..fires {
            prop_assert!(instance.fire_event("toggle", false, &()).unwrap());
        }

        prop_assert_eq!(instance.history().len(), fires);
        prop_assert_eq!(instance.history().get_path().len(), fires + 1);
        let expected = if fires % 2 == 0 { "on" } else { "off" };
        prop_assert!(instance.is_in_state(expected));
    }

    #[test]
    fn state_name_roundtrip_serialization(name in "[a-z_]{1,16}") {
        let state = StateName::new(name);
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: StateName = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(state, deserialized);
    }
}
