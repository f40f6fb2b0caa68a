//! Host commit callback.

use std::fmt;
use std::sync::Arc;

/// Type alias for the host persistence callback.
pub type CommitFn<V> = Arc<dyn Fn(&V) + Send + Sync>;

/// Fire-and-forget wrapper around the host's commit callback.
///
/// Invoking it means "commit attempted", never "commit succeeded"; the
/// outcome arrives later as an acknowledgment or not at all.
pub struct Committer<V> {
    callback: Option<CommitFn<V>>,
    attempts: u64,
}

impl<V> Committer<V> {
    /// Committer without a host callback. Attempts are still counted.
    pub fn none() -> Self {
        Self {
            callback: None,
            attempts: 0,
        }
    }

    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        Self {
            callback: Some(Arc::new(callback)),
            attempts: 0,
        }
    }

    /// Invoke the callback once with `draft`, returning the attempt number.
    pub fn attempt(&mut self, draft: &V) -> u64 {
        self.attempts += 1;
        if let Some(callback) = &self.callback {
            callback(draft);
        }
        self.attempts
    }

    /// Number of commit attempts made so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }
}

impl<V> Default for Committer<V> {
    fn default() -> Self {
        Self::none()
    }
}

impl<V> fmt::Debug for Committer<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Committer")
            .field("callback", &self.callback.is_some())
            .field("attempts", &self.attempts)
            .finish()
    }
}
