// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::VecDeque;

use kurbo::{Point, Vec2};

/// Samples pointer positions and estimates velocity over a trailing window.
#[derive(Debug, Clone)]
pub(crate) struct VelocityTracker {
    window: u64,
    samples: VecDeque<(u64, Point)>,
}

impl VelocityTracker {
    pub(crate) fn new(window: u64) -> Self {
        Self {
            window,
            samples: VecDeque::new(),
        }
    }

    pub(crate) fn set_window(&mut self, window: u64) {
        self.window = window;
    }

    pub(crate) fn reset(&mut self) {
        self.samples.clear();
    }

    pub(crate) fn push(&mut self, time: u64, pos: Point) {
        self.samples.push_back((time, pos));
        self.prune(time);
    }

    /// Velocity in units per second as of `now`.
    ///
    /// Returns zero when the pointer has rested for longer than the window.
    pub(crate) fn velocity(&mut self, now: u64) -> Vec2 {
        self.prune(now);
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.front(), self.samples.back()) else {
            return Vec2::ZERO;
        };
        if t1 <= t0 {
            return Vec2::ZERO;
        }
        let dt = (t1 - t0) as f64 / 1000.0;
        (p1 - p0) / dt
    }

    fn prune(&mut self, now: u64) {
        let horizon = now.saturating_sub(self.window);
        while let Some(&(t, _)) = self.samples.front() {
            if t < horizon {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }
}
