//! Single-slot timer service.
//!
//! A controller arms at most one timer at a time. Arming replaces whatever
//! was armed before; expiry is reported back to the controller as
//! `Event::TimerFired(token)`, and a token that no longer matches the armed
//! timer is stale and ignored.
//!
//! Two implementations are provided:
//! - [`ManualTimer`]: a virtual clock advanced explicitly, for hosts that
//!   run their own loop and for deterministic tests
//! - [`DeadlineTimer`]: tokio `Instant` deadlines, driven by the
//!   [`runtime`](crate::runtime) actor

mod deadline;
mod manual;

pub use deadline::DeadlineTimer;
pub use manual::ManualTimer;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// What an armed timer is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Pessimistic commit gave up waiting for acknowledgment.
    SaveTimeout,
    /// The `saved` confirmation has been shown long enough.
    SavedDisplay,
    /// The `error` state has been shown long enough.
    ErrorDisplay,
}

/// Identity of one arming. Tokens are never reused by the same service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Description of the currently armed timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArmedTimer {
    pub kind: TimerKind,
    pub token: TimerToken,
    pub after: Duration,
}

/// The timer seam between the controller and whatever clock drives it.
pub trait TimerService {
    /// Schedule `kind` to fire after `after`, discarding any armed timer.
    fn arm(&mut self, kind: TimerKind, after: Duration) -> TimerToken;

    /// Discard the armed timer, if any. It will never be reported as fired.
    fn cancel(&mut self);

    /// The currently armed timer.
    fn armed(&self) -> Option<ArmedTimer>;

    /// True if `token` belongs to the currently armed timer.
    fn is_current(&self, token: TimerToken) -> bool {
        self.armed().is_some_and(|armed| armed.token == token)
    }
}

/// Monotonic token source shared by the implementations.
#[derive(Debug, Default)]
struct TokenSeq(u64);

impl TokenSeq {
    fn next(&mut self) -> TimerToken {
        self.0 += 1;
        TimerToken(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_monotonic() {
        let mut seq = TokenSeq::default();
        let a = seq.next();
        let b = seq.next();
        assert!(b > a);
        assert_eq!(a.to_string(), "timer#1");
    }
}
