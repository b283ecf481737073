use std::collections::VecDeque;

use crate::clock::Timestamp;
use crate::config::REPLAY_SPEEDS;
use crate::snapshot::Snapshot;

/// Bounded log of movement-tick snapshots for in-session replay.
#[derive(Debug, Clone)]
pub struct History {
    frames: VecDeque<Snapshot>,
    capacity: usize,
}

impl History {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity.min(1_024)),
            capacity,
        }
    }

    /// Appends a frame, dropping the oldest one when full.
    pub fn record(&mut self, frame: Snapshot) {
        if self.capacity == 0 {
            return;
        }
        if self.frames.len() == self.capacity {
            let _ = self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }

    /// First frame recorded at or after `time`, or the last frame when `time`
    /// lies past the end.
    #[must_use]
    pub fn frame_at(&self, time: Timestamp) -> Option<&Snapshot> {
        self.frames
            .iter()
            .find(|frame| frame.now >= time)
            .or_else(|| self.frames.back())
    }

    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.frames.front().map_or(Timestamp::ZERO, |frame| frame.now)
    }

    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.frames.back().map_or(Timestamp::ZERO, |frame| frame.now)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

/// Playback position and speed over a [`History`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayCursor {
    position_ms: f64,
    start_ms: f64,
    end_ms: f64,
    speed_index: usize,
}

impl ReplayCursor {
    /// Starts at the first frame at normal speed.
    #[must_use]
    pub fn new(history: &History) -> Self {
        let start_ms = history.start().as_millis() as f64;
        Self {
            position_ms: start_ms,
            start_ms,
            end_ms: history.end().as_millis() as f64,
            speed_index: REPLAY_SPEEDS
                .iter()
                .position(|speed| (*speed - 1.0).abs() < f32::EPSILON)
                .unwrap_or(0),
        }
    }

    /// Plays `elapsed_ms` of wall time at the current speed.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let step = elapsed_ms as f64 * f64::from(self.speed());
        self.position_ms = (self.position_ms + step).min(self.end_ms);
    }

    /// Jumps by `delta_ms`, clamped to the recorded range.
    pub fn seek_by(&mut self, delta_ms: i64) {
        self.position_ms = (self.position_ms + delta_ms as f64).clamp(self.start_ms, self.end_ms);
    }

    pub fn faster(&mut self) {
        self.speed_index = (self.speed_index + 1).min(REPLAY_SPEEDS.len() - 1);
    }

    pub fn slower(&mut self) {
        self.speed_index = self.speed_index.saturating_sub(1);
    }

    #[must_use]
    pub fn speed(&self) -> f32 {
        REPLAY_SPEEDS[self.speed_index]
    }

    #[must_use]
    pub fn time(&self) -> Timestamp {
        Timestamp::from_millis(self.position_ms as u64)
    }

    /// Fraction of the recording already shown.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let span = self.end_ms - self.start_ms;
        if span <= 0.0 {
            return 1.0;
        }
        (self.position_ms - self.start_ms) / span
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position_ms >= self.end_ms
    }
}
