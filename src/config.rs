//! Controller configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default time a pessimistic commit may wait for its acknowledgment.
pub const DEFAULT_SAVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default time the `saved` confirmation stays on display.
pub const DEFAULT_SAVED_DURATION: Duration = Duration::from_secs(2);

/// Default time the `error` state stays on display.
pub const DEFAULT_ERROR_DURATION: Duration = Duration::from_secs(2);

/// How a commit is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitMode {
    /// Assume success immediately; never wait for an acknowledgment.
    Optimistic,
    /// Wait for an acknowledgment or the save timeout.
    #[default]
    Pessimistic,
}

/// Errors raised by invalid configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
}

/// Behaviour and timing of a controller.
///
/// # Example
///
/// ```rust
/// use editstate::config::{CommitMode, EditConfig};
/// use std::time::Duration;
///
/// let config = EditConfig {
///     mode: CommitMode::Optimistic,
///     saved_duration: Duration::from_millis(800),
///     ..EditConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditConfig {
    pub disabled: bool,
    pub allow_edit_while_pending: bool,
    pub mode: CommitMode,
    pub save_timeout: Duration,
    pub saved_duration: Duration,
    pub error_duration: Duration,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            allow_edit_while_pending: false,
            mode: CommitMode::default(),
            save_timeout: DEFAULT_SAVE_TIMEOUT,
            saved_duration: DEFAULT_SAVED_DURATION,
            error_duration: DEFAULT_ERROR_DURATION,
        }
    }
}

impl EditConfig {
    /// Check every timing value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_zero("save_timeout", self.save_timeout)?;
        non_zero("saved_duration", self.saved_duration)?;
        non_zero("error_duration", self.error_duration)?;
        Ok(())
    }

    /// Apply a single update, leaving `self` untouched if it is invalid.
    pub fn apply(&mut self, update: ConfigUpdate) -> Result<(), ConfigError> {
        match update {
            ConfigUpdate::Disabled(disabled) => self.disabled = disabled,
            ConfigUpdate::AllowEditWhilePending(allow) => self.allow_edit_while_pending = allow,
            ConfigUpdate::Mode(mode) => self.mode = mode,
            ConfigUpdate::SaveTimeout(d) => self.save_timeout = non_zero("save_timeout", d)?,
            ConfigUpdate::SavedDuration(d) => self.saved_duration = non_zero("saved_duration", d)?,
            ConfigUpdate::ErrorDuration(d) => self.error_duration = non_zero("error_duration", d)?,
        }
        Ok(())
    }
}

fn non_zero(field: &'static str, duration: Duration) -> Result<Duration, ConfigError> {
    if duration.is_zero() {
        Err(ConfigError::ZeroDuration { field })
    } else {
        Ok(duration)
    }
}

/// A host-side change to one configuration field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigUpdate {
    Disabled(bool),
    AllowEditWhilePending(bool),
    Mode(CommitMode),
    SaveTimeout(Duration),
    SavedDuration(Duration),
    ErrorDuration(Duration),
}

impl ConfigUpdate {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Disabled(_) => "disabled",
            Self::AllowEditWhilePending(_) => "allow_edit_while_pending",
            Self::Mode(_) => "mode",
            Self::SaveTimeout(_) => "save_timeout",
            Self::SavedDuration(_) => "saved_duration",
            Self::ErrorDuration(_) => "error_duration",
        }
    }
}
