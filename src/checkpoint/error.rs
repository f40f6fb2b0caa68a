//! Errors raised while saving or restoring a controller.

use thiserror::Error;

/// Why a [`Checkpoint`](super::Checkpoint) could not be written or read back.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The controller state could not be encoded as JSON or bincode.
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Stored bytes or text do not decode into a checkpoint.
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// The checkpoint was written by an incompatible format revision and
    /// cannot be handed to `ControllerBuilder::restore`.
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
