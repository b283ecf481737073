//! The one clock the simulation reads.
//!
//! Food is stamped and aged on the logical clock driven by the scheduler.
//! Wall-clock time only enters through [`FrameClock`], which turns frame
//! deltas into whole logical milliseconds.

use std::time::{Duration, Instant};

/// Milliseconds since the start of the current game on the logical clock.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn add_millis(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// Milliseconds elapsed from `earlier` to `self`, zero if `earlier` is later.
    #[must_use]
    pub const fn millis_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Measures wall-clock time between frames in whole milliseconds.
///
/// Sub-millisecond remainders carry over to the next frame. A single frame
/// never reports more than `max_delta`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    carry: Duration,
    max_delta: Duration,
}

impl FrameClock {
    #[must_use]
    pub fn new(max_delta: Duration) -> Self {
        Self {
            last: Instant::now(),
            carry: Duration::ZERO,
            max_delta,
        }
    }

    /// Returns the logical milliseconds elapsed since the previous call.
    pub fn tick(&mut self) -> u64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        self.split(elapsed)
    }

    fn split(&mut self, elapsed: Duration) -> u64 {
        let total = (self.carry + elapsed).min(self.max_delta);
        let whole_ms = total.as_millis();
        self.carry = total - Duration::from_millis(whole_ms as u64);
        whole_ms as u64
    }
}
