//! Deadline-based transient flags (invalid indicator, copy toast)

use std::time::{Duration, Instant};

/// A flag that stays active for a fixed window after being triggered.
///
/// Triggering while active restarts the window. The flag is polled from the
/// event loop, so expiry is observed on the first `tick` past the deadline.
#[derive(Debug, Clone)]
pub struct TransientFlag {
    duration: Duration,
    started_at: Option<Instant>,
}

impl TransientFlag {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started_at: None,
        }
    }

    /// Arm the flag, restarting the window if it is already active
    pub fn trigger(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    pub fn cancel(&mut self) {
        self.started_at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.started_at.is_some()
    }

    /// Check whether the flag is active at `now`
    pub fn is_active(&self, now: Instant) -> bool {
        self.started_at
            .is_some_and(|start| now.saturating_duration_since(start) < self.duration)
    }

    /// Fraction of the window elapsed (0.0 to 1.0), or None when inactive
    pub fn progress(&self, now: Instant) -> Option<f32> {
        if !self.is_active(now) {
            return None;
        }
        let start = self.started_at?;
        let elapsed = now.saturating_duration_since(start);
        Some((elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0))
    }

    /// Disarm the flag once its window has passed.
    /// Returns true only on the tick that observes the expiry.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.is_armed() && !self.is_active(now) {
            self.started_at = None;
            return true;
        }
        false
    }
}
