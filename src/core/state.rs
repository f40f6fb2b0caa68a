//! Lifecycle states of an editable value.
//!
//! The `State` trait gives the controller and its history a uniform way to
//! name and classify states without matching on the concrete enum.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Trait for lifecycle states.
///
/// All methods are pure. States are plain values describing where the
/// widget currently is in its edit cycle.
///
/// # Required Traits
///
/// - `Clone`: States are copied into transition history
/// - `PartialEq`: States are compared by transition logic
/// - `Debug`: States appear in diagnostics
/// - `Serialize` + `Deserialize`: States are written into checkpoints
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &'static str;

    /// Check if this state only lives until its display timer expires.
    ///
    /// Default implementation returns `false`.
    fn is_transient(&self) -> bool {
        false
    }

    /// Check if this state reports a failed save.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// The six states of the edit lifecycle.
///
/// # Example
///
/// ```rust
/// use editstate::core::{EditState, State};
///
/// assert_eq!(EditState::Pending.name(), "pending");
/// assert!(EditState::Saved.is_transient());
/// assert!(EditState::Error.is_error());
/// assert!(!EditState::Edit.is_transient());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditState {
    /// Interaction is switched off by configuration.
    Disabled,
    /// Showing the confirmed value.
    View,
    /// The draft is open for editing.
    Edit,
    /// A pessimistic commit is in flight.
    Pending,
    /// Save confirmation is on display.
    Saved,
    /// Save failure is on display.
    Error,
}

impl EditState {
    /// All states, in declaration order.
    pub const ALL: [EditState; 6] = [
        EditState::Disabled,
        EditState::View,
        EditState::Edit,
        EditState::Pending,
        EditState::Saved,
        EditState::Error,
    ];

    /// True while the draft is meaningful, i.e. editing or committing.
    pub fn holds_draft(&self) -> bool {
        matches!(self, Self::Edit | Self::Pending)
    }
}

impl State for EditState {
    fn name(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::View => "view",
            Self::Edit => "edit",
            Self::Pending => "pending",
            Self::Saved => "saved",
            Self::Error => "error",
        }
    }

    fn is_transient(&self) -> bool {
        matches!(self, Self::Saved | Self::Error)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_name_returns_correct_value() {
        let names: Vec<&str> = EditState::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["disabled", "view", "edit", "pending", "saved", "error"]
        );
    }

    #[test]
    fn is_transient_identifies_display_states() {
        for state in EditState::ALL {
            assert_eq!(
                state.is_transient(),
                matches!(state, EditState::Saved | EditState::Error)
            );
        }
    }

    #[test]
    fn only_error_is_error() {
        assert!(EditState::Error.is_error());
        assert!(!EditState::Pending.is_error());
        assert!(!EditState::Saved.is_error());
    }

    #[test]
    fn holds_draft_while_editing_or_committing() {
        assert!(EditState::Edit.holds_draft());
        assert!(EditState::Pending.holds_draft());
        assert!(!EditState::View.holds_draft());
        assert!(!EditState::Disabled.holds_draft());
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(EditState::Saved.to_string(), "saved");
    }

    #[test]
    fn state_serializes_as_lowercase_name() {
        let json = serde_json::to_string(&EditState::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let back: EditState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EditState::Pending);
    }
}
