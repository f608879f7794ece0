//! State names and state definitions.
//!
//! A [`StateName`] is the bare identifier an object occupies. A [`State`]
//! is the declared definition behind that name: optional enter/exit hooks
//! and description strings. Both compare by name only, so a definition can
//! be looked up directly with a raw name.

use super::action::{Action, ActionKind};
use super::error::FsmError;
use super::host::Stateful;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const DELEGATE_PREFIX: &str = "delegate_to_";

/// Name of a state, unique within one machine.
///
/// # Example
///
/// ```rust
/// use statewise::core::StateName;
///
/// let pending = StateName::new("pending");
/// assert_eq!(pending, "pending");
/// assert_eq!(pending.as_str(), "pending");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateName(String);

impl StateName {
    /// Create a state name from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The bare name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Association this state hands active-state resolution off to.
    ///
    /// States named `delegate_to_<association>` delegate to the machine
    /// exposed by the host under `<association>`.
    ///
    /// ```rust
    /// use statewise::core::StateName;
    ///
    /// assert_eq!(StateName::new("delegate_to_payment").delegate_association(), Some("payment"));
    /// assert_eq!(StateName::new("pending").delegate_association(), None);
    /// ```
    pub fn delegate_association(&self) -> Option<&str> {
        self.0
            .find(DELEGATE_PREFIX)
            .map(|at| &self.0[at + DELEGATE_PREFIX.len()..])
            .filter(|association| !association.is_empty())
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for StateName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&StateName> for StateName {
    fn from(name: &StateName) -> Self {
        name.clone()
    }
}

impl AsRef<str> for StateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StateName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StateName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A declared state with optional lifecycle hooks.
///
/// # Example
///
/// ```rust
/// use statewise::core::{Action, State};
///
/// struct Door {
///     opened: u32,
/// }
///
/// let open: State<Door> = State::new("open")
///     .on_enter(Action::function(|door: &mut Door| {
///         door.opened += 1;
///         Ok(())
///     }))
///     .describe("title", "The door is open");
///
/// assert_eq!(open, "open");
/// assert_eq!(open.description("title"), Some("The door is open"));
/// ```
pub struct State<O> {
    name: StateName,
    enter: Option<Action<O>>,
    exit: Option<Action<O>>,
    descriptions: BTreeMap<String, String>,
}

impl<O> State<O> {
    pub fn new(name: impl Into<StateName>) -> Self {
        Self {
            name: name.into(),
            enter: None,
            exit: None,
            descriptions: BTreeMap::new(),
        }
    }

    /// Hook run when an event moves the object into this state.
    pub fn on_enter(mut self, action: Action<O>) -> Self {
        self.enter = Some(action);
        self
    }

    /// Hook run when an event moves the object out of this state.
    pub fn on_exit(mut self, action: Action<O>) -> Self {
        self.exit = Some(action);
        self
    }

    /// Attach a description template under `key`.
    pub fn describe(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.descriptions.insert(key.into(), text.into());
        self
    }

    pub fn name(&self) -> &StateName {
        &self.name
    }

    pub fn description(&self, key: &str) -> Option<&str> {
        self.descriptions.get(key).map(String::as_str)
    }

    pub fn descriptions(&self) -> &BTreeMap<String, String> {
        &self.descriptions
    }

    pub fn action(&self, kind: ActionKind) -> Option<&Action<O>> {
        match kind {
            ActionKind::Enter => self.enter.as_ref(),
            ActionKind::Exit => self.exit.as_ref(),
            _ => None,
        }
    }
}

impl<O: Stateful> State<O> {
    /// Run the hook registered for `kind` against `object`.
    ///
    /// Missing hooks are a no-op. Hook failures are wrapped with the hook
    /// kind and returned unchanged otherwise.
    pub fn call_action(&self, kind: ActionKind, object: &mut O) -> Result<(), FsmError> {
        let Some(action) = self.action(kind) else {
            return Ok(());
        };
        tracing::trace!(state = %self.name, hook = %kind, "invoking state hook");
        action
            .invoke(object)
            .map_err(|source| FsmError::Callback { kind, source })
    }
}

impl<O> Clone for State<O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            enter: self.enter.clone(),
            exit: self.exit.clone(),
            descriptions: self.descriptions.clone(),
        }
    }
}

impl<O> fmt::Debug for State<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("enter", &self.enter)
            .field("exit", &self.exit)
            .field("descriptions", &self.descriptions)
            .finish()
    }
}

impl<O> PartialEq for State<O> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<O> PartialEq<StateName> for State<O> {
    fn eq(&self, other: &StateName) -> bool {
        self.name == *other
    }
}

impl<O> PartialEq<str> for State<O> {
    fn eq(&self, other: &str) -> bool {
        self.name == *other
    }
}

impl<O> PartialEq<&str> for State<O> {
    fn eq(&self, other: &&str) -> bool {
        self.name == **other
    }
}

impl<O> From<&str> for State<O> {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl<O> From<String> for State<O> {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl<O> From<StateName> for State<O> {
    fn from(name: StateName) -> Self {
        Self::new(name)
    }
}
