//! Inbound events and the result of processing them.

use crate::config::ConfigUpdate;
use crate::core::EditState;
use crate::timer::TimerToken;

/// Everything the rendering layer, host, or timer can tell the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum Event<V> {
    /// Click or focus on the displayed value.
    Activate,
    /// The draft input changed.
    Change(V),
    /// Enter or blur: try to commit the draft.
    Confirm,
    /// Escape: drop the draft.
    Cancel,
    /// The host confirms a pessimistic commit. `None` acknowledges the
    /// value that was sent.
    Ack(Option<V>),
    /// The host pushed a new confirmed value.
    ExternalValue(V),
    /// The host changed one configuration field.
    Configure(ConfigUpdate),
    /// An armed timer expired.
    TimerFired(TimerToken),
}

impl<V> Event<V> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Change(_) => "change",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Ack(_) => "ack",
            Self::ExternalValue(_) => "external_value",
            Self::Configure(_) => "configure",
            Self::TimerFired(_) => "timer_fired",
        }
    }
}

/// Result of processing one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The machine moved to a different state.
    Transitioned { from: EditState, to: EditState },
    /// The event was applied without changing state.
    Stayed(EditState),
    /// The event has no meaning in the current state.
    Ignored {
        state: EditState,
        reason: &'static str,
    },
}

impl Step {
    /// State the machine is in after the event.
    pub fn state(&self) -> EditState {
        match *self {
            Self::Transitioned { to, .. } => to,
            Self::Stayed(state) | Self::Ignored { state, .. } => state,
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored { .. })
    }
}
