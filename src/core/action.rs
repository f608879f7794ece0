//! Lifecycle hooks attached to states and events.

use super::host::Stateful;
use std::fmt;
use std::sync::Arc;

/// Error type returned by user supplied hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Hook function invoked with the host object.
pub type ActionFn<O> = Arc<dyn Fn(&mut O) -> Result<(), BoxError> + Send + Sync>;

/// Which lifecycle hook is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Enter,
    Exit,
    Transition,
    Success,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Enter => "enter",
            Self::Exit => "exit",
            Self::Transition => "transition",
            Self::Success => "success",
        };
        f.write_str(name)
    }
}

/// A hook reference, resolved once at declaration time.
///
/// `Message` hands a named message to the host's [`Stateful::receive`];
/// `Function` calls the closure with the host object.
pub enum Action<O> {
    Message(String),
    Function(ActionFn<O>),
}

impl<O> Action<O> {
    pub fn message(name: impl Into<String>) -> Self {
        Self::Message(name.into())
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&mut O) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }
}

impl<O: Stateful> Action<O> {
    pub fn invoke(&self, object: &mut O) -> Result<(), BoxError> {
        match self {
            Self::Message(message) => object.receive(message),
            Self::Function(f) => f(object),
        }
    }
}

impl<O> Clone for Action<O> {
    fn clone(&self) -> Self {
        match self {
            Self::Message(message) => Self::Message(message.clone()),
            Self::Function(f) => Self::Function(Arc::clone(f)),
        }
    }
}

impl<O> fmt::Debug for Action<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => f.debug_tuple("Message").field(message).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}
