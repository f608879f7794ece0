//! Machine instances and the event firing algorithm.

use super::definition::Machine;
use crate::core::{
    ActionKind, ActiveState, FsmError, State, StateHistory, StateName, StateTransition, Stateful,
};
use chrono::Utc;
use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

/// A host object paired with the machine that drives it.
///
/// The current state is read lazily: a value from [`Stateful::read_state`]
/// is cached on first access, otherwise the machine's initial state is
/// reported until a fire commits something else.
///
/// # Example
///
/// ```rust
/// use statewise::builder::{EventBuilder, MachineBuilder, TransitionBuilder};
/// use statewise::core::Stateful;
/// use statewise::machine::Instance;
/// use std::sync::Arc;
///
/// struct Order;
/// impl Stateful for Order {}
///
/// let machine = MachineBuilder::<Order>::new()
///     .state("pending")
///     .state("shipped")
///     .event(EventBuilder::new("ship").transition(TransitionBuilder::new().from("pending").to("shipped")))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let mut order = Instance::new(Arc::new(machine), Order);
/// assert!(order.fire_event("ship", true, &()).unwrap());
/// assert!(order.is_in_state("shipped"));
/// ```
pub struct Instance<O, A = ()> {
    machine: Arc<Machine<O, A>>,
    object: O,
    current: OnceCell<StateName>,
    history: StateHistory,
    history_limit: Option<usize>,
}

impl<O: Stateful, A> Instance<O, A> {
    /// Attach `object` to `machine`.
    ///
    /// Nothing is read from the object yet; the current state is resolved
    /// on first access.
    pub fn new(machine: Arc<Machine<O, A>>, object: O) -> Self {
        Self {
            machine,
            object,
            current: OnceCell::new(),
            history: StateHistory::new(),
            history_limit: None,
        }
    }

    /// Keep at most `limit` entries of transition history.
    ///
    /// Older entries are dropped as new fires commit. A limit of zero
    /// disables history recording.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statewise::builder::{EventBuilder, MachineBuilder};
    /// use statewise::core::Stateful;
    /// use statewise::machine::Instance;
    /// use std::sync::Arc;
    ///
    /// struct Switch;
    /// impl Stateful for Switch {}
    ///
    /// let machine = MachineBuilder::<Switch>::new()
    ///     .states(["off", "on"])
    ///     .event(EventBuilder::new("toggle").transitions("off", "on").transitions("on", "off"))
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// let mut switch = Instance::new(Arc::new(machine), Switch).with_history_limit(2);
    /// for _ in 0..5 {
    ///     switch.fire_event("toggle", false, &()).unwrap();
    /// }
    /// assert_eq!(switch.history().len(), 2);
    /// ```
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history.truncate_front(limit);
        self.history_limit = Some(limit);
        self
    }

    /// Drop every recorded transition. The current state is unaffected.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub(crate) fn restore(
        machine: Arc<Machine<O, A>>,
        object: O,
        current: StateName,
        history: StateHistory,
    ) -> Self {
        Self {
            machine,
            object,
            current: OnceCell::from(current),
            history,
            history_limit: None,
        }
    }

    /// The shared machine definition.
    pub fn machine(&self) -> &Arc<Machine<O, A>> {
        &self.machine
    }

    /// The host object.
    pub fn object(&self) -> &O {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut O {
        &mut self.object
    }

    /// Detach the host object from the machine.
    pub fn into_inner(self) -> O {
        self.object
    }

    /// Transitions committed by this instance, oldest first.
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// The state the object is in.
    ///
    /// On first access the host's [`Stateful::read_state`] is consulted and
    /// a value found there is cached. Without one, the machine's initial
    /// state is reported and nothing is cached, so a later persisted value
    /// is still picked up.
    pub fn current_state(&self) -> StateName {
        if let Some(state) = self.current.get() {
            return state.clone();
        }
        if let Some(state) = self.object.read_state() {
            return self.current.get_or_init(|| state).clone();
        }
        self.machine.initial_state().clone()
    }

    pub fn is_in_state(&self, state: impl Into<StateName>) -> bool {
        self.current_state() == state.into()
    }

    /// Assign the current state directly, bypassing events and hooks.
    pub fn set_current_state(&mut self, state: impl Into<StateName>) {
        let state = state.into();
        self.object.write_state_without_persistence(&state);
        self.current = OnceCell::from(state);
    }

    pub fn events_for_state(&self, state: &StateName) -> Vec<&str> {
        self.machine.events_for_state(state)
    }

    /// Names of the events that have a transition out of the current state.
    pub fn events_for_current_state(&self) -> Vec<&str> {
        let current = self.current_state();
        self.machine.events_for_state(&current)
    }

    /// Fire `event` from the current state.
    ///
    /// Returns `Ok(true)` when a transition was committed and `Ok(false)`
    /// when every applicable guard declined. Hooks run in this order, with
    /// `exit`, `enter` and `success` skipped on loopback:
    ///
    /// `exit(old) -> transition -> enter(new) -> event_fired(old, new) -> success()`
    ///
    /// `success` only runs when `persist` is set. Errors from hooks or
    /// persistence abort the sequence where they occur; nothing is rolled
    /// back.
    pub fn fire_event(&mut self, event: &str, persist: bool, args: &A) -> Result<bool, FsmError> {
        self.fire(event, None, persist, args)
    }

    /// Fire `event` toward a specific target state.
    pub fn fire_event_to(
        &mut self,
        event: &str,
        to: impl Into<StateName>,
        persist: bool,
        args: &A,
    ) -> Result<bool, FsmError> {
        let to = to.into();
        self.fire(event, Some(&to), persist, args)
    }

    fn fire(
        &mut self,
        name: &str,
        to: Option<&StateName>,
        persist: bool,
        args: &A,
    ) -> Result<bool, FsmError> {
        let machine = Arc::clone(&self.machine);
        let event = machine.event(name).ok_or_else(|| {
            tracing::warn!(event = name, "unknown event");
            FsmError::UnknownEvent {
                event: name.to_string(),
            }
        })?;

        let current = self.current_state();
        let is_loopback =
            event.get_next_state(&self.object, &current, to, args).as_ref() == Some(&current);

        if !is_loopback {
            state_for(&machine, &current)?.call_action(ActionKind::Exit, &mut self.object)?;
        }

        // Runs on loopback too: the transition side effect is never skipped.
        let Some(next) = event.fire(&mut self.object, &current, to, args)? else {
            tracing::debug!(event = name, state = %current, "all guards declined");
            self.object.event_failed(name);
            return Ok(false);
        };

        if !is_loopback {
            state_for(&machine, &next)?.call_action(ActionKind::Enter, &mut self.object)?;
        }

        self.object.event_fired(&current, &next);

        tracing::debug!(
            event = name,
            from = %current,
            to = %next,
            loopback = is_loopback,
            persist,
            "event fired"
        );

        if persist {
            self.commit_persisted(&next)?;
            self.record(name, current, next, true);
            if !is_loopback {
                event.call_success(&mut self.object)?;
            }
        } else {
            self.commit(&next);
            self.record(name, current, next, false);
        }

        Ok(true)
    }

    fn commit_persisted(&mut self, state: &StateName) -> Result<(), FsmError> {
        self.object
            .write_state(state)
            .map_err(|source| FsmError::Persistence {
                state: state.clone(),
                source,
            })?;
        self.commit(state);
        Ok(())
    }

    fn commit(&mut self, state: &StateName) {
        self.object.write_state_without_persistence(state);
        self.current = OnceCell::from(state.clone());
    }

    fn record(&mut self, event: &str, from: StateName, to: StateName, persisted: bool) {
        let transition = StateTransition {
            from,
            to,
            event: event.to_string(),
            timestamp: Utc::now(),
            persisted,
        };
        self.history.push(transition, self.history_limit);
    }

    /// Resolve the state that is actually active, following
    /// `delegate_to_<association>` states into associated machines.
    pub fn active_state(&self) -> Result<StateName, FsmError> {
        let current = self.current_state();
        let Some(association) = current.delegate_association() else {
            return Ok(current);
        };
        match self.object.association(association) {
            Some(delegate) => delegate.active_state(),
            None => Err(FsmError::MissingAssociation {
                association: association.to_string(),
            }),
        }
    }

    /// Resolve the next state for `event` without firing it.
    pub fn peek(&self, event: &str, args: &A) -> Result<Option<StateName>, FsmError> {
        let resolved = self
            .machine
            .event(event)
            .map(|e| e.get_next_state(&self.object, &self.current_state(), None, args));
        resolved.ok_or_else(|| FsmError::UnknownEvent {
            event: event.to_string(),
        })
    }
}

fn state_for<'m, O, A>(
    machine: &'m Machine<O, A>,
    name: &StateName,
) -> Result<&'m State<O>, FsmError> {
    machine.state(name).ok_or_else(|| FsmError::UnknownState {
        state: name.clone(),
    })
}

impl<O: Stateful, A> ActiveState for Instance<O, A> {
    fn active_state(&self) -> Result<StateName, FsmError> {
        Instance::active_state(self)
    }
}

impl<O: fmt::Debug, A> fmt::Debug for Instance<O, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("object", &self.object)
            .field("current", &self.current.get())
            .field("history", &self.history)
            .finish()
    }
}
