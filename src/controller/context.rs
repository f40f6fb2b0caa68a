//! Controller-owned context and the read-only view handed to renderers.

use crate::core::EditState;
use crate::validation::Violation;
use serde::{Deserialize, Serialize};

/// Values the controller owns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Context<V> {
    /// Last value known to be durably accepted.
    pub confirmed: V,
    /// Value being edited; mirrors `confirmed` outside `edit`/`pending`.
    pub draft: V,
    /// Result of the last validation run.
    pub is_valid: bool,
    /// Rules violated by the last validation run.
    pub violations: Vec<Violation>,
}

impl<V: Clone> Context<V> {
    pub fn new(value: V) -> Self {
        Self {
            draft: value.clone(),
            confirmed: value,
            is_valid: true,
            violations: Vec::new(),
        }
    }

    /// Point the draft back at the confirmed value.
    pub(crate) fn reset_draft(&mut self) {
        self.draft = self.confirmed.clone();
    }
}

/// Everything a renderer needs after an event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<V> {
    pub state: EditState,
    pub confirmed: V,
    pub draft: V,
    pub is_valid: bool,
    pub violations: Vec<Violation>,
    /// A commit was sent and is still unacknowledged.
    pub committing: bool,
}

impl<V: PartialEq> Snapshot<V> {
    /// True if the draft diverges from the confirmed value.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_mirrors_value_and_is_valid() {
        let context = Context::new("Alice".to_string());
        assert_eq!(context.draft, "Alice");
        assert_eq!(context.confirmed, "Alice");
        assert!(context.is_valid);
        assert!(context.violations.is_empty());
    }

    #[test]
    fn reset_draft_copies_confirmed() {
        let mut context = Context::new(1);
        context.draft = 5;
        context.reset_draft();
        assert_eq!(context.draft, 1);
    }

    #[test]
    fn snapshot_is_dirty_when_draft_differs() {
        let snapshot = Snapshot {
            state: EditState::Edit,
            confirmed: "a",
            draft: "b",
            is_valid: true,
            violations: Vec::new(),
            committing: false,
        };
        assert!(snapshot.is_dirty());
    }
}
