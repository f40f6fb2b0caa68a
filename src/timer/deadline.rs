//! Wall-clock timer for the async runtime.

use super::{ArmedTimer, TimerKind, TimerService, TimerToken, TokenSeq};
use std::time::Duration;
use tokio::time::Instant;

/// Timer that records a tokio deadline.
///
/// It never sleeps itself; the runtime loop sleeps until
/// [`DeadlineTimer::deadline`] and then calls [`DeadlineTimer::take_due`].
#[derive(Debug, Default)]
pub struct DeadlineTimer {
    slot: Option<(ArmedTimer, Instant)>,
    seq: TokenSeq,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.slot.map(|(_, deadline)| deadline)
    }

    /// Disarm and return the token if the deadline has passed at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<TimerToken> {
        match self.slot {
            Some((armed, deadline)) if deadline <= now => {
                self.slot = None;
                Some(armed.token)
            }
            _ => None,
        }
    }
}

impl TimerService for DeadlineTimer {
    fn arm(&mut self, kind: TimerKind, after: Duration) -> TimerToken {
        let token = self.seq.next();
        self.slot = Some((ArmedTimer { kind, token, after }, Instant::now() + after));
        token
    }

    fn cancel(&mut self) {
        self.slot = None;
    }

    fn armed(&self) -> Option<ArmedTimer> {
        self.slot.map(|(armed, _)| armed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn take_due_only_after_deadline() {
        let mut timer = DeadlineTimer::new();
        let token = timer.arm(TimerKind::SaveTimeout, Duration::from_millis(200));

        assert_eq!(timer.take_due(Instant::now()), None);
        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(timer.take_due(Instant::now()), Some(token));
        assert!(timer.deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_clears_deadline() {
        let mut timer = DeadlineTimer::new();
        timer.arm(TimerKind::SavedDisplay, Duration::from_millis(10));
        timer.cancel();

        tokio::time::advance(Duration::from_millis(50)).await;
        assert_eq!(timer.take_due(Instant::now()), None);
    }
}
