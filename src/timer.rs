//! Recurring wall-clock timers for the dashboard loop
//!
//! Timers do not read the clock themselves. The runner passes in the time
//! elapsed since start, which keeps them easy to drive from tests.

use std::time::Duration;

/// A fixed-period timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    period: Duration,
    next_due: Duration,
}

impl Timer {
    /// A timer whose first firing is one full period after start.
    /// A zero period is treated as one millisecond.
    pub fn new(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_due: period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// When this timer fires next, measured from start
    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    /// Number of firings that are due at `now`, consuming them
    pub fn fire(&mut self, now: Duration) -> u32 {
        let mut fired = 0;
        while self.next_due <= now {
            self.next_due += self.period;
            fired += 1;
        }
        fired
    }

    /// How long until this timer is next due at `now`
    pub fn until_due(&self, now: Duration) -> Duration {
        self.next_due.saturating_sub(now)
    }
}

/// Time to wait before the earliest of `timers` is due
pub fn sleep_until_next(timers: &[&Timer], now: Duration) -> Duration {
    timers
        .iter()
        .map(|t| t.until_due(now))
        .min()
        .unwrap_or(Duration::ZERO)
}
