//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while saving or restoring a checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Checkpoint serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Checkpoint deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The checkpoint does not fit the machine it is resumed against
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),
}
