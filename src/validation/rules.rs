//! Draft validator built from accumulating rules.

use crate::validation::violations::Violation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of validating a draft.
pub type Verdict = Validation<(), NonEmptyVec<Violation>>;

/// Type alias for validation rule functions
pub type Rule<V> = Box<dyn Fn(&V) -> Verdict + Send + Sync>;

/// Validator for draft values.
/// Uses Validation to report ALL violated rules, not just the first.
pub struct Validator<V> {
    rules: Vec<Rule<V>>,
}

impl<V> Validator<V> {
    /// Validator that accepts every value.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Validator wrapping a host predicate.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        Self::new().require_with(move |value| {
            if predicate(value) {
                Validation::success(())
            } else {
                Validation::fail(Violation::Rejected)
            }
        })
    }

    /// Add a predicate rule with an error message
    pub fn require<F>(self, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        let message = message.into();
        self.require_with(move |value| {
            if predicate(value) {
                Validation::success(())
            } else {
                Validation::fail(Violation::Rule {
                    message: message.clone(),
                })
            }
        })
    }

    /// Add a rule returning its own verdict
    pub fn require_with<F>(mut self, rule: F) -> Self
    where
        F: Fn(&V) -> Verdict + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Run every rule against `value`, accumulating all violations.
    pub fn validate(&self, value: &V) -> Verdict {
        let checks: Vec<Verdict> = self.rules.iter().map(|rule| rule(value)).collect();
        Validation::all_vec(checks).map(|_| ())
    }

    pub fn is_valid(&self, value: &V) -> bool {
        self.validate(value).is_success()
    }

    /// Violated rules for `value`, empty when valid.
    pub fn violations(&self, value: &V) -> Vec<Violation> {
        match self.validate(value) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    /// True if no rule is configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<V: AsRef<str>> Validator<V> {
    /// Reject empty or whitespace-only text.
    pub fn require_non_empty(self) -> Self {
        self.require_with(|value: &V| {
            if value.as_ref().trim().is_empty() {
                Validation::fail(Violation::Empty)
            } else {
                Validation::success(())
            }
        })
    }
}

impl<V> Default for Validator<V> {
    fn default() -> Self {
        Self::new()
    }
}
