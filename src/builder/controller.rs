//! Builder for constructing controllers.

use crate::builder::error::BuildError;
use crate::checkpoint::Checkpoint;
use crate::commit::Committer;
use crate::config::{CommitMode, EditConfig};
use crate::controller::{Context, Controller, Value};
use crate::core::{StateHistory, DEFAULT_HISTORY_CAPACITY};
use crate::timer::{ManualTimer, TimerService};
use crate::validation::Validator;
use std::time::Duration;

/// Builder for constructing controllers with a fluent API.
pub struct ControllerBuilder<V: Value> {
    value: Option<V>,
    config: EditConfig,
    validator: Validator<V>,
    committer: Committer<V>,
    history_capacity: usize,
    checkpoint: Option<Checkpoint<V>>,
}

impl<V: Value> ControllerBuilder<V> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            value: None,
            config: EditConfig::default(),
            validator: Validator::new(),
            committer: Committer::none(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            checkpoint: None,
        }
    }

    /// Set the externally supplied value (required unless restoring).
    pub fn value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: EditConfig) -> Self {
        self.config = config;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    pub fn allow_edit_while_pending(mut self, allow: bool) -> Self {
        self.config.allow_edit_while_pending = allow;
        self
    }

    pub fn mode(mut self, mode: CommitMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn save_timeout(mut self, timeout: Duration) -> Self {
        self.config.save_timeout = timeout;
        self
    }

    pub fn saved_duration(mut self, duration: Duration) -> Self {
        self.config.saved_duration = duration;
        self
    }

    pub fn error_duration(mut self, duration: Duration) -> Self {
        self.config.error_duration = duration;
        self
    }

    /// Set the draft validator (optional; accepts everything by default).
    pub fn validator(mut self, validator: Validator<V>) -> Self {
        self.validator = validator;
        self
    }

    /// Validate drafts with a single host predicate.
    pub fn validate_with<F>(self, predicate: F) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.validator(Validator::predicate(predicate))
    }

    /// Set the host persistence callback (optional).
    pub fn on_commit<F>(mut self, callback: F) -> Self
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.committer = Committer::new(callback);
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Resume from a checkpoint.
    ///
    /// Takes the checkpoint's configuration; later configuration calls on
    /// the builder override it. Validator and commit callback are not part
    /// of a checkpoint and must be supplied again.
    pub fn restore(mut self, checkpoint: Checkpoint<V>) -> Self {
        self.config = checkpoint.config.clone();
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Build a controller driven by a [`ManualTimer`].
    pub fn build(self) -> Result<Controller<V, ManualTimer>, BuildError> {
        self.build_with(ManualTimer::new())
    }

    /// Build a controller driven by `timer`.
    /// Returns an error if required fields are missing or invalid.
    pub fn build_with<T: TimerService>(self, timer: T) -> Result<Controller<V, T>, BuildError> {
        self.config.validate()?;

        let Some(checkpoint) = self.checkpoint else {
            let value = self.value.ok_or(BuildError::MissingValue)?;
            return Ok(Controller::new(
                Context::new(value),
                self.config,
                self.validator,
                self.committer,
                timer,
                StateHistory::with_capacity(self.history_capacity),
            ));
        };

        checkpoint.check_version()?;
        let mut controller = Controller::new(
            checkpoint.context,
            self.config,
            self.validator,
            self.committer,
            timer,
            checkpoint.history,
        );
        controller.in_flight = checkpoint.in_flight;
        controller.resume_from(checkpoint.id, checkpoint.state, checkpoint.resume);
        Ok(controller)
    }
}

impl<V: Value> Default for ControllerBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
