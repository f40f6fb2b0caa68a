//! Virtual-clock timer.

use super::{ArmedTimer, TimerKind, TimerService, TimerToken, TokenSeq};
use std::time::Duration;

/// Timer driven by an explicit virtual clock.
///
/// Time only moves when [`ManualTimer::fire_due`] is called, which makes
/// every timed transition reproducible.
///
/// # Example
///
/// ```rust
/// use editstate::timer::{ManualTimer, TimerKind, TimerService};
/// use std::time::Duration;
///
/// let mut timer = ManualTimer::new();
/// let token = timer.arm(TimerKind::SavedDisplay, Duration::from_millis(100));
///
/// assert_eq!(timer.fire_due(Duration::from_millis(99)), None);
/// assert_eq!(timer.fire_due(Duration::from_millis(150)), Some(token));
/// assert_eq!(timer.now(), Duration::from_millis(100));
/// assert!(timer.armed().is_none());
/// ```
#[derive(Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    slot: Option<(ArmedTimer, Duration)>,
    seq: TokenSeq,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time, measured from construction.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Virtual time at which the armed timer fires.
    pub fn deadline(&self) -> Option<Duration> {
        self.slot.map(|(_, deadline)| deadline)
    }

    /// Move the clock towards `until`.
    ///
    /// If the armed timer is due by then, the clock stops at its deadline,
    /// the timer is disarmed and its token returned. Otherwise the clock
    /// advances to `until`. Call repeatedly to drain chained timers.
    pub fn fire_due(&mut self, until: Duration) -> Option<TimerToken> {
        match self.slot {
            Some((armed, deadline)) if deadline <= until => {
                self.now = self.now.max(deadline);
                self.slot = None;
                Some(armed.token)
            }
            _ => {
                self.now = self.now.max(until);
                None
            }
        }
    }
}

impl TimerService for ManualTimer {
    fn arm(&mut self, kind: TimerKind, after: Duration) -> TimerToken {
        let token = self.seq.next();
        let armed = ArmedTimer { kind, token, after };
        self.slot = Some((armed, self.now + after));
        token
    }

    fn cancel(&mut self) {
        self.slot = None;
    }

    fn armed(&self) -> Option<ArmedTimer> {
        self.slot.map(|(armed, _)| armed)
    }
}
