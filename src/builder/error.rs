//! Errors raised while assembling a controller.

use crate::checkpoint::CheckpointError;
use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a controller.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial value not specified. Call .value(v) or .restore(checkpoint) before .build()")]
    MissingValue,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Cannot restore checkpoint: {0}")]
    Checkpoint(#[from] CheckpointError),
}
