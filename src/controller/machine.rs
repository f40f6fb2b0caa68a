//! The edit lifecycle state machine.

use crate::commit::Committer;
use crate::config::{CommitMode, ConfigError, ConfigUpdate, EditConfig};
use crate::controller::context::{Context, Snapshot};
use crate::controller::event::{Event, Step};
use crate::controller::Value;
use crate::core::{EditState, State, StateHistory, StateTransition};
use crate::timer::{ArmedTimer, DeadlineTimer, ManualTimer, TimerKind, TimerService, TimerToken};
use crate::validation::Validator;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// Lifecycle controller for one editable value.
///
/// Processes one [`Event`] at a time to completion. Owns the context, the
/// single timer, and the host adapters; callers observe it through
/// [`Controller::state`] and [`Controller::snapshot`].
///
/// Build one with [`ControllerBuilder`](crate::builder::ControllerBuilder).
pub struct Controller<V: Value, T: TimerService = ManualTimer> {
    pub(crate) id: Uuid,
    pub(crate) state: EditState,
    /// State to re-enter when re-enabled. Only set while disabled.
    pub(crate) resume: Option<EditState>,
    pub(crate) context: Context<V>,
    /// Value sent by the last pessimistic commit, until acknowledged.
    pub(crate) in_flight: Option<V>,
    pub(crate) config: EditConfig,
    pub(crate) history: StateHistory<EditState>,
    validator: Validator<V>,
    committer: Committer<V>,
    timer: T,
    armed: Option<(TimerKind, TimerToken)>,
}

impl<V: Value, T: TimerService> Controller<V, T> {
    pub(crate) fn new(
        context: Context<V>,
        config: EditConfig,
        validator: Validator<V>,
        committer: Committer<V>,
        timer: T,
        history: StateHistory<EditState>,
    ) -> Self {
        let (state, resume) = if config.disabled {
            (EditState::Disabled, Some(EditState::View))
        } else {
            (EditState::View, None)
        };
        Self {
            id: Uuid::new_v4(),
            state,
            resume,
            context,
            in_flight: None,
            config,
            history,
            validator,
            committer,
            timer,
            armed: None,
        }
    }

    /// Re-enter a previously checkpointed state.
    ///
    /// Goes through the same path as re-enabling, so transient states settle
    /// and a pending commit gets a fresh save timeout.
    pub(crate) fn resume_from(&mut self, id: Uuid, state: EditState, resume: Option<EditState>) {
        self.id = id;
        self.state = EditState::Disabled;
        self.resume = Some(match state {
            EditState::Disabled => resume.unwrap_or(EditState::View),
            other => other,
        });
        if !self.config.disabled {
            let step = self.enable();
            self.finish("restore", step);
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn context(&self) -> &Context<V> {
        &self.context
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    pub fn history(&self) -> &StateHistory<EditState> {
        &self.history
    }

    /// Value of the unacknowledged pessimistic commit, if any.
    pub fn in_flight(&self) -> Option<&V> {
        self.in_flight.as_ref()
    }

    pub fn is_committing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn commit_attempts(&self) -> u64 {
        self.committer.attempts()
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn armed_timer(&self) -> Option<ArmedTimer> {
        self.timer.armed()
    }

    /// Read-only view for the rendering layer.
    pub fn snapshot(&self) -> Snapshot<V> {
        Snapshot {
            state: self.state,
            confirmed: self.context.confirmed.clone(),
            draft: self.context.draft.clone(),
            is_valid: self.context.is_valid,
            violations: self.context.violations.clone(),
            committing: self.in_flight.is_some(),
        }
    }

    /// Process one event to completion.
    pub fn handle(&mut self, event: Event<V>) -> Step {
        let name = event.name();
        let step = match event {
            Event::Configure(update) => match self.apply_config(update) {
                Ok(step) => step,
                Err(err) => {
                    warn!(
                        widget = %self.id,
                        field = update.name(),
                        error = %err,
                        "configuration update rejected"
                    );
                    self.ignore("invalid configuration")
                }
            },
            Event::ExternalValue(value) => self.on_external_value(value),
            Event::Ack(value) => self.on_ack(value),
            Event::TimerFired(token) => self.on_timer(token),
            _ if self.state == EditState::Disabled => self.ignore("disabled"),
            Event::Activate => self.on_activate(),
            Event::Change(value) => self.on_change(value),
            Event::Confirm => self.on_confirm(),
            Event::Cancel => self.on_cancel(),
        };
        self.finish(name, step)
    }

    /// Apply a configuration change, surfacing invalid values to the caller.
    pub fn update_config(&mut self, update: ConfigUpdate) -> Result<Step, ConfigError> {
        let step = self.apply_config(update)?;
        Ok(self.finish("configure", step))
    }

    fn apply_config(&mut self, update: ConfigUpdate) -> Result<Step, ConfigError> {
        let was_disabled = self.config.disabled;
        self.config.apply(update)?;
        Ok(match (was_disabled, self.config.disabled) {
            (false, true) => self.disable(),
            (true, false) => self.enable(),
            _ => Step::Stayed(self.state),
        })
    }

    fn on_activate(&mut self) -> Step {
        match self.state {
            EditState::View => {
                self.revert_draft();
                self.enter(EditState::Edit)
            }
            // The draft already holds the in-flight value and the save
            // timeout keeps running underneath the overlay.
            EditState::Pending if self.config.allow_edit_while_pending => {
                self.shift(EditState::Edit)
            }
            EditState::Pending => self.ignore("commit in flight"),
            EditState::Edit => self.ignore("already editing"),
            _ => self.ignore("feedback on display"),
        }
    }

    fn on_change(&mut self, value: V) -> Step {
        match self.state {
            EditState::Edit => {
                self.context.draft = value;
                self.revalidate();
                Step::Stayed(EditState::Edit)
            }
            EditState::Pending => self.ignore("draft frozen while committing"),
            _ => self.ignore("not editing"),
        }
    }

    fn on_confirm(&mut self) -> Step {
        if self.state != EditState::Edit {
            return self.ignore("not editing");
        }

        self.revalidate();
        if !self.context.is_valid {
            debug!(widget = %self.id, violations = self.context.violations.len(), "draft rejected");
            // Violations stay on display for the whole error state.
            self.context.reset_draft();
            return self.enter(EditState::Error);
        }

        if self.context.draft == self.context.confirmed && self.in_flight.is_none() {
            return self.enter(EditState::View);
        }

        let draft = self.context.draft.clone();
        let attempt = self.committer.attempt(&draft);
        debug!(widget = %self.id, attempt, mode = ?self.config.mode, "commit attempted");

        match self.config.mode {
            CommitMode::Optimistic => {
                self.in_flight = None;
                self.context.confirmed = draft;
                self.enter(EditState::Saved)
            }
            CommitMode::Pessimistic => {
                self.in_flight = Some(draft);
                self.enter(EditState::Pending)
            }
        }
    }

    fn on_cancel(&mut self) -> Step {
        if self.state != EditState::Edit {
            return self.ignore("not editing");
        }
        // Leaving the overlay goes back to waiting on the outstanding commit.
        if let Some(sent) = &self.in_flight {
            self.context.draft = sent.clone();
            self.revalidate();
            return self.shift(EditState::Pending);
        }
        self.revert_draft();
        self.enter(EditState::View)
    }

    fn on_ack(&mut self, value: Option<V>) -> Step {
        let Some(sent) = self.in_flight.take() else {
            return self.ignore("no commit in flight");
        };
        self.context.confirmed = value.unwrap_or(sent);

        match self.state {
            EditState::Pending => {
                self.revert_draft();
                self.enter(EditState::Saved)
            }
            // Local intent wins: the overlay draft is left alone.
            EditState::Edit => {
                self.disarm();
                Step::Stayed(EditState::Edit)
            }
            EditState::Disabled => {
                if matches!(self.resume, Some(EditState::Pending)) {
                    self.resume = Some(EditState::View);
                }
                if !self.resume.is_some_and(|s| s.holds_draft()) {
                    self.revert_draft();
                }
                Step::Stayed(EditState::Disabled)
            }
            state => {
                self.revert_draft();
                Step::Stayed(state)
            }
        }
    }

    fn on_external_value(&mut self, value: V) -> Step {
        if self.in_flight.as_ref() == Some(&value) {
            return self.on_ack(Some(value));
        }
        self.context.confirmed = value;

        match self.state {
            EditState::Edit | EditState::Pending => Step::Stayed(self.state),
            EditState::View => {
                self.revert_draft();
                Step::Stayed(EditState::View)
            }
            // A commit sent from the overlay is still outstanding.
            EditState::Error if self.in_flight.is_some() => self.await_in_flight(),
            EditState::Saved | EditState::Error => {
                self.revert_draft();
                self.enter(EditState::View)
            }
            EditState::Disabled => {
                if matches!(self.resume, Some(EditState::Saved | EditState::Error)) {
                    self.resume = Some(EditState::View);
                }
                if !self.resume.is_some_and(|s| s.holds_draft()) {
                    self.revert_draft();
                }
                Step::Stayed(EditState::Disabled)
            }
        }
    }

    fn on_timer(&mut self, token: TimerToken) -> Step {
        let Some((kind, armed)) = self.armed else {
            return self.ignore("no timer armed");
        };
        if armed != token {
            return self.ignore("stale timer");
        }
        self.armed = None;

        match (kind, self.state) {
            (TimerKind::SaveTimeout, EditState::Pending) => {
                debug!(widget = %self.id, "save timed out");
                self.in_flight = None;
                self.revert_draft();
                self.enter(EditState::Error)
            }
            // The overlay draft survives a timed-out commit.
            (TimerKind::SaveTimeout, EditState::Edit) => {
                debug!(widget = %self.id, "save timed out while editing");
                self.in_flight = None;
                Step::Stayed(EditState::Edit)
            }
            (TimerKind::SavedDisplay, EditState::Saved) => self.enter(EditState::View),
            (TimerKind::ErrorDisplay, EditState::Error) => {
                self.revert_draft();
                self.enter(EditState::Edit)
            }
            _ => self.ignore("timer does not match state"),
        }
    }

    fn disable(&mut self) -> Step {
        self.resume = Some(self.state);
        // Error violations are not shown while disabled.
        self.revalidate();
        self.enter(EditState::Disabled)
    }

    fn enable(&mut self) -> Step {
        match self.resume.take().unwrap_or(EditState::View) {
            EditState::Edit => self.enter(EditState::Edit),
            EditState::Error => {
                self.revert_draft();
                self.enter(EditState::Edit)
            }
            _ if self.in_flight.is_some() => self.await_in_flight(),
            _ => {
                self.revert_draft();
                self.enter(EditState::View)
            }
        }
    }

    /// Show the in-flight value in `pending` with a fresh save timeout.
    fn await_in_flight(&mut self) -> Step {
        if let Some(sent) = &self.in_flight {
            self.context.draft = sent.clone();
        }
        self.revalidate();
        self.enter(EditState::Pending)
    }

    /// Move to `next` and arm exactly the timer that state needs.
    ///
    /// An `edit` overlay over an outstanding commit gets a save timeout of
    /// its own, so the commit still resolves.
    fn enter(&mut self, next: EditState) -> Step {
        let timer = match next {
            EditState::Pending => Some((TimerKind::SaveTimeout, self.config.save_timeout)),
            EditState::Edit if self.in_flight.is_some() => {
                Some((TimerKind::SaveTimeout, self.config.save_timeout))
            }
            EditState::Saved => Some((TimerKind::SavedDisplay, self.config.saved_duration)),
            EditState::Error => Some((TimerKind::ErrorDisplay, self.config.error_duration)),
            _ => None,
        };
        match timer {
            Some((kind, after)) => self.armed = Some((kind, self.timer.arm(kind, after))),
            None => self.disarm(),
        }
        self.shift(next)
    }

    /// Move to `next` leaving the armed timer running.
    fn shift(&mut self, next: EditState) -> Step {
        let from = self.state;
        self.state = next;
        if from == next {
            Step::Stayed(next)
        } else {
            Step::Transitioned { from, to: next }
        }
    }

    fn disarm(&mut self) {
        self.timer.cancel();
        self.armed = None;
    }

    fn revert_draft(&mut self) {
        self.context.reset_draft();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        let violations = self.validator.violations(&self.context.draft);
        self.context.is_valid = violations.is_empty();
        self.context.violations = violations;
    }

    fn ignore(&self, reason: &'static str) -> Step {
        Step::Ignored {
            state: self.state,
            reason,
        }
    }

    fn finish(&mut self, event: &'static str, step: Step) -> Step {
        match step {
            Step::Transitioned { from, to } => {
                self.history.record(StateTransition {
                    from,
                    to,
                    event: event.to_string(),
                    timestamp: Utc::now(),
                });
                debug!(
                    widget = %self.id,
                    from = from.name(),
                    to = to.name(),
                    event,
                    "transition"
                );
            }
            Step::Ignored { state, reason } => {
                trace!(widget = %self.id, state = state.name(), event, reason, "event ignored");
            }
            Step::Stayed(_) => {}
        }
        step
    }
}

impl<V: Value> Controller<V, ManualTimer> {
    /// Advance the virtual clock by `by`, firing every timer that falls due.
    ///
    /// Each timer fires at its exact deadline, so a timer armed by a fired
    /// transition counts from that deadline.
    pub fn advance(&mut self, by: Duration) -> Vec<Step> {
        let until = self.timer.now() + by;
        let mut steps = Vec::new();
        while let Some(token) = self.timer.fire_due(until) {
            steps.push(self.handle(Event::TimerFired(token)));
        }
        steps
    }
}

impl<V: Value> Controller<V, DeadlineTimer> {
    /// Fire the armed timer if its deadline has passed at `now`.
    pub fn fire_due(&mut self, now: tokio::time::Instant) -> Option<Step> {
        let token = self.timer.take_due(now)?;
        Some(self.handle(Event::TimerFired(token)))
    }
}

impl<V: Value, T: TimerService> Drop for Controller<V, T> {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}
