//! Reference clock for deadlines.
//!
//! The host supplies block time: a timestamp that never decreases within one
//! state advance. Every node replaying the same blocks sees the same clock,
//! so deadline arithmetic stays deterministic.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Timestamp used for deadlines.
pub type BlockTime = DateTime<Utc>;

/// Source of the current block time.
pub trait Clock {
    fn now(&self) -> BlockTime;
}

impl<F> Clock for F
where
    F: Fn() -> BlockTime,
{
    fn now(&self) -> BlockTime {
        self()
    }
}

/// Manually driven clock.
///
/// ```
/// use chrono::Duration;
/// use rust_checkers::core::{Clock, FixedClock};
///
/// let mut clock = FixedClock::at_unix(0);
/// clock.advance(Duration::hours(1));
/// assert_eq!(clock.now().timestamp(), 3600);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock {
    now: BlockTime,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: BlockTime) -> Self {
        Self { now }
    }

    /// Clock reading `secs` seconds after the Unix epoch.
    #[must_use]
    pub fn at_unix(secs: i64) -> Self {
        Self::new(Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
    }

    /// Move the clock forward. Negative durations are ignored.
    pub fn advance(&mut self, by: Duration) {
        if by > Duration::zero() {
            self.now += by;
        }
    }

    /// Jump to `now` if it is not earlier than the current reading.
    pub fn set(&mut self, now: BlockTime) {
        if now > self.now {
            self.now = now;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> BlockTime {
        self.now
    }
}

/// Wall-clock time, for hosts without a consensus clock.
///
/// Not deterministic across nodes; replicated hosts should pass block time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> BlockTime {
        Utc::now()
    }
}
