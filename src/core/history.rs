//! Transition history tracking.
//!
//! Every committed fire is recorded as an immutable [`StateTransition`].
//! [`StateHistory::record`] returns a new history; instances append in
//! place and may cap how many entries they keep.

use super::state::StateName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: StateName,
    /// The state being transitioned to
    pub to: StateName,
    /// Event that caused the transition
    pub event: String,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
    /// Whether the new state was written through persistence
    pub persisted: bool,
}

impl StateTransition {
    /// Whether the transition left the object in the state it started from.
    pub fn is_loopback(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered history of committed transitions.
///
/// # Example
///
/// ```rust
/// use statewise::core::{StateHistory, StateName, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new().record(StateTransition {
///     from: StateName::new("pending"),
///     to: StateName::new("shipped"),
///     event: "ship".to_string(),
///     timestamp: Utc::now(),
///     persisted: true,
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 2);
/// assert_eq!(path[1], &StateName::new("shipped"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut history = self.clone();
        history.push(transition, None);
        history
    }

    /// Append a transition in place, dropping the oldest entries beyond
    /// `limit`.
    pub(crate) fn push(&mut self, transition: StateTransition, limit: Option<usize>) {
        self.transitions.push(transition);
        if let Some(limit) = limit {
            self.truncate_front(limit);
        }
    }

    /// Keep only the newest `limit` transitions.
    pub(crate) fn truncate_front(&mut self, limit: usize) {
        let excess = self.transitions.len().saturating_sub(limit);
        if excess > 0 {
            self.transitions.drain(..excess);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.transitions.clear();
    }

    /// States traversed: the first source, then every target in order.
    pub fn get_path(&self) -> Vec<&StateName> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Most recently recorded transition.
    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.last()
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
