// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel and touchpad input.
//!
//! Wheel events arrive in bursts with no explicit end; a burst ends after
//! [`WHEEL_BURST_END_MS`] of silence. In follow mode every delta moves the
//! track target. Otherwise a burst steps whole slides, using heuristics to
//! tell a touchpad's long inertial tail (one step) from a new swipe of the
//! fingers (another step).

use std::collections::VecDeque;

use understory_timing::Debounce;

use crate::driver::Driver;
use crate::event::SnapEvent;
use crate::geometry::Geometry;
use crate::navigation::TransitionOptions;
use crate::props::{Freemode, InputAxis, NavDirection, WheelThrottle};
use crate::snap::Snap;

/// Silence that ends a burst, in milliseconds.
pub const WHEEL_BURST_END_MS: u64 = 200;

/// A burst starts once a single delta, or the deltas accumulated so far,
/// reach this magnitude.
pub const WHEEL_START_DELTA: f64 = 2.0;

/// Cool-down of [`WheelThrottle::Auto`] after a step or an internal scroll,
/// in milliseconds.
pub const AUTO_THROTTLE_MS: u64 = 500;

/// Deltas below this magnitude are typical of touchpads.
pub const TOUCHPAD_SMALL_DELTA: f64 = 10.0;

/// The trailing three deltas must exceed the three before them by this
/// factor for the input to count as accelerating.
///
/// Empirically tuned.
pub const GAIN_RATIO: f64 = 1.2;

/// A burst counts as decaying once deltas fall below this share of its peak.
pub const DECAY_RATIO: f64 = 0.5;

const HISTORY: usize = 10;
const CLASSIFY_WINDOW: usize = 5;
const LINE_HEIGHT: f64 = 16.0;

/// Unit of [`WheelInput`] deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeltaMode {
    /// Pixels.
    #[default]
    Pixel,
    /// Lines of 16px.
    Line,
    /// Pages of one container extent.
    Page,
}

/// One wheel event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelInput {
    /// Horizontal delta; positive scrolls right.
    pub delta_x: f64,
    /// Vertical delta; positive scrolls down.
    pub delta_y: f64,
    /// Unit of both deltas.
    pub mode: DeltaMode,
}

impl WheelInput {
    /// A pixel-mode wheel event.
    #[must_use]
    pub fn pixels(delta_x: f64, delta_y: f64) -> Self {
        Self {
            delta_x,
            delta_y,
            mode: DeltaMode::Pixel,
        }
    }
}

/// Per-burst wheel state.
#[derive(Clone, Debug)]
pub(crate) struct Wheel {
    pub(crate) end: Debounce,
    pub(crate) started: bool,
    pending: f64,
    deltas: VecDeque<f64>,
    has_stepped: bool,
    peak: f64,
    is_decaying: bool,
    last_step: Option<u64>,
    last_inner_scroll: Option<u64>,
}

impl Wheel {
    pub(crate) fn new() -> Self {
        Self {
            end: Debounce::new(WHEEL_BURST_END_MS),
            started: false,
            pending: 0.0,
            deltas: VecDeque::with_capacity(HISTORY),
            has_stepped: false,
            peak: 0.0,
            is_decaying: false,
            last_step: None,
            last_inner_scroll: None,
        }
    }

    fn reset(&mut self) {
        self.end.cancel();
        self.started = false;
        self.pending = 0.0;
        self.deltas.clear();
        self.has_stepped = false;
        self.peak = 0.0;
        self.is_decaying = false;
    }

    fn record(&mut self, delta: f64) {
        if self.deltas.len() == HISTORY {
            self.deltas.pop_front();
        }
        self.deltas.push_back(delta);
        let magnitude = delta.abs();
        if magnitude > self.peak {
            self.peak = magnitude;
            self.is_decaying = false;
        } else if magnitude < self.peak * DECAY_RATIO {
            self.is_decaying = true;
        }
    }

    /// Small deltas, or deltas varying by more than the platform's jitter.
    fn is_touchpad(&self, precision: f64) -> bool {
        let skip = self.deltas.len().saturating_sub(CLASSIFY_WINDOW);
        let recent: Vec<f64> = self.deltas.iter().skip(skip).map(|d| d.abs()).collect();
        if recent.is_empty() {
            return false;
        }
        let small = recent.iter().all(|d| *d < TOUCHPAD_SMALL_DELTA);
        let unstable = recent.windows(2).any(|w| (w[1] - w[0]).abs() > precision);
        small || unstable
    }

    fn is_gaining(&self) -> bool {
        let len = self.deltas.len();
        if len < 6 {
            return false;
        }
        let mean = |from: usize| {
            self.deltas
                .range(from..from + 3)
                .map(|d| d.abs())
                .sum::<f64>()
                / 3.0
        };
        mean(len - 3) > mean(len - 6) * GAIN_RATIO
    }

    fn mark_step(&mut self, now: u64) {
        self.has_stepped = true;
        self.last_step = Some(now);
        self.peak = self.deltas.back().map_or(0.0, |d| d.abs());
        self.is_decaying = false;
    }

    fn trailing_sum(&self) -> f64 {
        self.deltas.iter().rev().take(3).sum()
    }
}

impl Snap {
    /// Handles one wheel event at `now`. Returns `false` when it was ignored.
    pub fn on_wheel(&mut self, input: WheelInput, now: u64) -> bool {
        self.now = now;
        if !self.props.wheel || self.slides.is_empty() {
            return false;
        }
        let delta = self.decode_wheel(input);
        if delta == 0.0 || !delta.is_finite() {
            return false;
        }

        self.wheel.end.schedule(now);
        if !self.wheel.started {
            self.wheel.pending += delta;
            if delta.abs() < WHEEL_START_DELTA && self.wheel.pending.abs() < WHEEL_START_DELTA {
                tracing::trace!(delta, pending = self.wheel.pending, "wheel below start delta");
                return true;
            }
            self.claim(Driver::Wheel);
            self.wheel.started = true;
            self.events.push(SnapEvent::WheelStart);
            tracing::debug!("wheel burst started");
        }
        self.wheel.record(delta);

        if self.props.follow_wheel {
            self.claim(Driver::Wheel);
            self.track.iterate_target(delta * self.props.wheel_speed);
            let geo = Geometry::new(&self.slides, self.layout);
            self.track.clamp_target(&geo);
            self.play();
        } else {
            self.wheel_step(delta, now);
        }
        self.events.push(SnapEvent::Wheel { delta });
        true
    }

    fn decode_wheel(&self, input: WheelInput) -> f64 {
        let unit = match input.mode {
            DeltaMode::Pixel => 1.0,
            DeltaMode::Line => LINE_HEIGHT,
            DeltaMode::Page => self.layout.dom_size,
        };
        let delta = match self.props.wheel_axis {
            InputAxis::Horizontal => input.delta_x,
            InputAxis::Vertical => input.delta_y,
            InputAxis::Auto => {
                if input.delta_x.abs() > input.delta_y.abs() {
                    input.delta_x
                } else {
                    input.delta_y
                }
            }
        };
        delta * unit
    }

    fn wheel_step(&mut self, delta: f64, now: u64) {
        let direction = if delta > 0.0 {
            NavDirection::Next
        } else {
            NavDirection::Prev
        };

        if self.wheel_scroll_inside(delta, direction) {
            self.wheel.last_inner_scroll = Some(now);
            return;
        }

        if self.is_wheel_throttled(now) {
            tracing::trace!("wheel step throttled");
            return;
        }
        let precision = self.units.viewport().os.touchpad_precision();
        if self.wheel.is_touchpad(precision) && self.wheel.has_stepped {
            let new_gesture = self.wheel.is_decaying && self.wheel.is_gaining();
            if !new_gesture {
                tracing::trace!("touchpad tail ignored");
                return;
            }
            tracing::trace!("touchpad gesture restarted");
        }

        self.wheel.mark_step(now);
        let options = TransitionOptions::default();
        match direction {
            NavDirection::Next => self.next(options),
            NavDirection::Prev => self.prev(options),
        };
    }

    /// Scrolls within an oversized active slide. Returns `false` once its
    /// edge in `direction` is reached.
    fn wheel_scroll_inside(&mut self, delta: f64, direction: NavDirection) -> bool {
        let geo = self.geometry();
        let Some(slide) = self.slides.get(self.active_index) else {
            return false;
        };
        if !slide.is_oversized(&geo) {
            return false;
        }
        let (start, end) = slide.scroll_range(&geo);
        let target = self.track.looped_target(&geo);
        let at_edge = match direction {
            NavDirection::Next => target >= end - 0.5,
            NavDirection::Prev => target <= start + 0.5,
        };
        if at_edge || target < start - 0.5 || target > end + 0.5 {
            return false;
        }
        let next = (target + delta * self.props.wheel_speed).clamp(start, end);
        let shift = next - target;
        self.claim(Driver::Wheel);
        self.track.iterate_target(shift);
        self.play();
        true
    }

    fn is_wheel_throttled(&self, now: u64) -> bool {
        let since = |at: Option<u64>| at.map(|t| now.saturating_sub(t));
        match self.props.wheel_throttle {
            WheelThrottle::Millis(ms) => since(self.wheel.last_step).is_some_and(|d| d < ms),
            WheelThrottle::Auto => {
                self.transition.is_some()
                    || since(self.wheel.last_step).is_some_and(|d| d < AUTO_THROTTLE_MS)
                    || since(self.wheel.last_inner_scroll).is_some_and(|d| d < AUTO_THROTTLE_MS)
            }
        }
    }

    /// Fired through the burst-end deadline.
    pub(crate) fn on_wheel_end(&mut self) {
        if !self.wheel.started {
            self.wheel.reset();
            return;
        }
        self.release(Driver::Wheel);
        self.events.push(SnapEvent::WheelEnd);
        tracing::debug!("wheel burst ended");

        let settle = self.props.freemode != Freemode::Plain && self.props.stick_on_wheel_end;
        if settle {
            if self.props.follow_wheel {
                self.settle_followed_wheel();
            } else if !self.wheel.has_stepped {
                self.stick();
            }
        }
        self.wheel.reset();
    }

    fn settle_followed_wheel(&mut self) {
        let direction = self.wheel.trailing_sum();
        let geo = self.geometry();
        let target = self.track.looped_target(&geo);
        let Some(magnet) = self.nearest_magnet_to(target) else {
            return;
        };
        let offset = -magnet.diff;
        let continues = direction != 0.0
            && offset.signum() == direction.signum()
            && offset.abs() > self.props.stick_on_wheel_end_threshold;
        if !continues {
            self.stick();
            return;
        }
        let len = self.slides.len();
        let (index, nav) = if direction > 0.0 {
            (magnet.index + 1, NavDirection::Next)
        } else if magnet.index == 0 {
            (if geo.can_loop() { len - 1 } else { 0 }, NavDirection::Prev)
        } else {
            (magnet.index - 1, NavDirection::Prev)
        };
        tracing::trace!(index, "wheel end continues to neighbor");
        self.to_slide(index, TransitionOptions::default().direction(nav));
    }

    /// Ends a burst without settling, when another driver takes over.
    pub(crate) fn interrupt_wheel(&mut self) {
        if self.wheel.started {
            self.events.push(SnapEvent::WheelEnd);
            tracing::debug!("wheel burst interrupted");
        }
        self.wheel.reset();
        if self.driver == Driver::Wheel {
            self.driver = Driver::None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TOUCHPAD_SMALL_DELTA, Wheel};

    fn wheel(deltas: &[f64]) -> Wheel {
        let mut wheel = Wheel::new();
        for d in deltas {
            wheel.record(*d);
        }
        wheel
    }

    #[test]
    fn classifies_touchpads() {
        assert!(wheel(&[1.0, 1.0, 1.0]).is_touchpad(0.0));
        assert!(!wheel(&[100.0, 100.0, 100.0]).is_touchpad(0.0));
        assert!(wheel(&[100.0, 120.0, 90.0]).is_touchpad(0.0));
        assert!(!wheel(&[100.0, 100.5, 100.0]).is_touchpad(1.0));
        assert!(TOUCHPAD_SMALL_DELTA > 1.0);
    }

    #[test]
    fn detects_gain_after_decay() {
        let w = wheel(&[40.0, 20.0, 4.0, 3.0, 2.0, 1.0, 8.0, 12.0, 16.0]);
        assert!(w.is_decaying);
        assert!(w.is_gaining());
        assert!(!wheel(&[10.0, 9.0, 8.0, 7.0, 6.0, 5.0]).is_gaining());
    }

    #[test]
    fn keeps_a_bounded_history() {
        let w = wheel(&[1.0; 25]);
        assert_eq!(w.deltas.len(), 10);
        assert_eq!(w.trailing_sum(), 3.0);
    }
}
