//! Checkpoint and resume for machine instances.
//!
//! A checkpoint captures an instance's current state and transition
//! history so it can be restored later against the same machine. Hooks,
//! guards and the host object itself are not part of a checkpoint.

use crate::core::{StateHistory, StateName, Stateful};
use crate::machine::{Instance, Machine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Summary counters derived from the history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckpointMetadata {
    /// When the first recorded transition happened
    pub first_transition_at: Option<DateTime<Utc>>,

    /// When the last recorded transition happened
    pub last_transition_at: Option<DateTime<Utc>>,

    /// Committed fires per event name
    pub fire_counts: BTreeMap<String, usize>,
}

impl CheckpointMetadata {
    fn from_history(history: &StateHistory) -> Self {
        let mut fire_counts = BTreeMap::new();
        for transition in history.transitions() {
            *fire_counts.entry(transition.event.clone()).or_insert(0) += 1;
        }
        Self {
            first_transition_at: history.transitions().first().map(|t| t.timestamp),
            last_transition_at: history.last().map(|t| t.timestamp),
            fire_counts,
        }
    }
}

/// Serializable snapshot of an instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Initial state of the machine the instance ran on
    pub initial_state: StateName,

    /// Current state of the instance
    pub current_state: StateName,

    /// Complete transition history
    pub history: StateHistory,

    /// Counters summarizing the history
    pub metadata: CheckpointMetadata,
}

impl Checkpoint {
    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Parse a JSON checkpoint, rejecting versions newer than
    /// [`CHECKPOINT_VERSION`].
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Serialize to the compact bincode format.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode a bincode checkpoint, with the same version check as
    /// [`Checkpoint::from_json`].
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version > CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl<O: Stateful, A> Instance<O, A> {
    /// Capture the current state and history.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial_state: self.machine().initial_state().clone(),
            current_state: self.current_state(),
            history: self.history().clone(),
            metadata: CheckpointMetadata::from_history(self.history()),
        }
    }

    /// Rebuild an instance from a checkpoint taken against `machine`.
    ///
    /// The checkpointed state must be declared on `machine`. No hooks run
    /// and nothing is written through persistence.
    pub fn resume(
        machine: Arc<Machine<O, A>>,
        object: O,
        checkpoint: Checkpoint,
    ) -> Result<Self, CheckpointError> {
        checkpoint.check_version()?;
        if !machine.has_state(&checkpoint.current_state) {
            return Err(CheckpointError::ValidationFailed(format!(
                "state '{}' is not declared on this machine",
                checkpoint.current_state
            )));
        }

        tracing::debug!(
            checkpoint = %checkpoint.id,
            state = %checkpoint.current_state,
            "resuming instance from checkpoint"
        );
        Ok(Instance::restore(
            machine,
            object,
            checkpoint.current_state,
            checkpoint.history,
        ))
    }
}
