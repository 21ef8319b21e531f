//! Repeating hold timer.
//!
//! The timer does not sleep by itself: the owning task waits on
//! [`HoldTimer::deadline`] and calls [`HoldTimer::fire`] when it passes. Keeping
//! the clock outside makes every tick reproducible in tests.

use embassy_time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct HoldTimer {
    interval: Duration,
    /// Start of the hold window, one interval after the press.
    hold_start: Option<Instant>,
    next_tick: Option<Instant>,
}

impl HoldTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            hold_start: None,
            next_tick: None,
        }
    }

    /// Arm the timer for a press that began at `pressed_at`.
    pub fn start(&mut self, pressed_at: Instant) {
        let hold_start = pressed_at + self.interval;
        self.hold_start = Some(hold_start);
        self.next_tick = Some(hold_start);
    }

    pub fn stop(&mut self) {
        self.hold_start = None;
        self.next_tick = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// When the next tick is due, if the timer is armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Produce the sample for a tick due at or before `now`.
    ///
    /// The sample is the time spent in the hold window plus one interval,
    /// i.e. the hold duration seen by this tick. Ticks missed by a late
    /// wake-up are skipped, not replayed.
    pub fn fire(&mut self, now: Instant) -> Option<f64> {
        let (hold_start, due) = (self.hold_start?, self.next_tick?);
        if now < due {
            return None;
        }

        let mut next = due + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_tick = Some(next);

        let in_window = now.saturating_duration_since(hold_start);
        Some(seconds(in_window + self.interval))
    }
}

/// Convert a duration to fractional seconds.
pub fn seconds(duration: Duration) -> f64 {
    duration.as_micros() as f64 / 1_000_000.0
}

/// Convert fractional seconds to a duration, rounded to the microsecond.
pub fn from_seconds(secs: f64) -> Duration {
    Duration::from_micros((secs * 1_000_000.0).round() as u64)
}
