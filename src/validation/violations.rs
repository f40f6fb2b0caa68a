//! Violation errors reported by draft validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single rule the draft failed.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum Violation {
    #[error("Value must not be empty")]
    Empty,

    #[error("Value rejected by validator")]
    Rejected,

    #[error("{message}")]
    Rule { message: String },
}
