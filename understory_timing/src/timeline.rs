// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Ease;

/// Progress snapshot reported by [`Timeline::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineProgress {
    /// Linear progress in `[0, 1]`.
    pub progress: f64,
    /// `progress` passed through the timeline's easing.
    pub eased: f64,
}

/// A scripted tween that runs for a fixed duration.
///
/// Timelines do not own a clock: the host advances them by frame durations.
#[derive(Clone, Debug)]
pub struct Timeline {
    duration: f64,
    elapsed: f64,
    ease: Ease,
}

impl Timeline {
    /// Creates a timeline lasting `duration` milliseconds.
    ///
    /// Negative or non-finite durations are treated as zero.
    #[must_use]
    pub fn new(duration: f64, ease: Ease) -> Self {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        Self {
            duration,
            elapsed: 0.0,
            ease,
        }
    }

    /// Total duration in milliseconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Current progress without advancing.
    #[must_use]
    pub fn progress(&self) -> TimelineProgress {
        let progress = if self.duration <= 0.0 {
            if self.elapsed > 0.0 { 1.0 } else { 0.0 }
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        };
        TimelineProgress {
            progress,
            eased: self.ease.apply(progress),
        }
    }

    /// Advances by `dt` milliseconds and returns the new progress.
    ///
    /// A zero-duration timeline completes on its first advance, even with
    /// `dt == 0`.
    pub fn advance(&mut self, dt: f64) -> TimelineProgress {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if self.duration <= 0.0 {
            self.elapsed = f64::MIN_POSITIVE;
        } else {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
        self.progress()
    }

    /// Returns `true` once the timeline reached its end.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress().progress >= 1.0
    }
}
