//! Per-tick motion and timing helpers.

use glam::Vec2;
use std::time::Duration;

/// Move `current` toward `target` by at most `max_delta`.
///
/// Lands exactly on `target` when it is within reach, so callers can detect
/// arrival with an equality check.
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + delta / distance * max_delta
    }
}

/// Convert configured seconds into a `Duration`.
///
/// Negative and NaN values become zero; values too large to represent
/// saturate to `Duration::MAX`.
pub fn seconds(value: f32) -> Duration {
    match Duration::try_from_secs_f32(value) {
        Ok(duration) => duration,
        Err(_) if value > 0.0 => Duration::MAX,
        Err(_) => Duration::ZERO,
    }
}

/// One-shot timer advanced by tick deltas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining: Duration,
}

impl Countdown {
    pub fn new(duration: Duration) -> Self {
        Self {
            remaining: duration,
        }
    }

    /// Advance by `dt`; returns `true` once the countdown has run out.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(dt);
        self.remaining.is_zero()
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }
}
