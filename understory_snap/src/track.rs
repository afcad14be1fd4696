// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scroll position shared by all slides.

use understory_timing::lerp;

use crate::geometry::Geometry;

/// Below this distance to the target, interpolation is sped up so the
/// track lands instead of trailing asymptotically.
///
/// Empirically tuned; the boost is `(1 - factor) / 3 * (1 - distance / 5)`.
pub const FAST_LERP_THRESHOLD: f64 = 5.0;

/// The authoritative scroll position.
///
/// `current` is what slides are rendered at; `target` is where input wants
/// it to be. They only compare equal once interpolation converged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Track {
    current: f64,
    target: f64,
}

impl Track {
    /// A track resting at `coord`.
    #[must_use]
    pub fn new(coord: f64) -> Self {
        Self {
            current: coord,
            target: coord,
        }
    }

    /// Rendered position.
    #[must_use]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Desired position.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Jumps both `current` and `target` to `coord`.
    pub fn set(&mut self, coord: f64) {
        self.current = coord;
        self.target = coord;
    }

    /// Moves the target without touching `current`.
    pub fn set_target(&mut self, coord: f64) {
        self.target = coord;
    }

    /// Accumulates `delta` into the target.
    pub fn iterate_target(&mut self, delta: f64) {
        if delta.is_finite() {
            self.target += delta;
        }
    }

    /// Returns `true` once `current` reached `target`.
    #[must_use]
    pub fn is_interpolated(&self) -> bool {
        self.current == self.target
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self, geo: &Geometry<'_>) -> f64 {
        geo.min()
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self, geo: &Geometry<'_>) -> f64 {
        geo.max()
    }

    /// See [`Geometry::can_loop`].
    #[must_use]
    pub fn can_loop(&self, geo: &Geometry<'_>) -> bool {
        geo.can_loop()
    }

    /// See [`Geometry::loop_coord`].
    #[must_use]
    pub fn loop_coord(&self, coord: f64, geo: &Geometry<'_>) -> f64 {
        geo.loop_coord(coord)
    }

    /// `current` wrapped into the loop period.
    #[must_use]
    pub fn looped_current(&self, geo: &Geometry<'_>) -> f64 {
        geo.loop_coord(self.current)
    }

    /// `target` wrapped into the loop period.
    #[must_use]
    pub fn looped_target(&self, geo: &Geometry<'_>) -> f64 {
        geo.loop_coord(self.target)
    }

    /// Clamps the target into `[min, max]` unless the track loops.
    pub fn clamp_target(&mut self, geo: &Geometry<'_>) {
        if geo.can_loop() {
            return;
        }
        self.target = self.target.clamp(geo.min(), geo.max());
    }

    /// Shifts both positions by whole loop periods so that `current` lies
    /// in `[min, max)`. Relative motion is unchanged.
    pub fn normalize_loop(&mut self, geo: &Geometry<'_>) {
        if !geo.can_loop() {
            return;
        }
        let period = geo.period();
        if period <= 0.0 {
            return;
        }
        let shift = self.current.div_euclid(period) * period;
        if shift != 0.0 {
            self.current -= shift;
            self.target -= shift;
        }
    }

    /// Index of the oversized slide the track is currently scrolling
    /// inside, if any.
    #[must_use]
    pub fn scrolling_slide(&self, geo: &Geometry<'_>) -> Option<usize> {
        geo.slides()
            .iter()
            .position(|slide| slide.is_scrolling_at(self.current, geo))
    }

    /// Returns `true` while input scrolls inside an oversized slide rather
    /// than between slides.
    #[must_use]
    pub fn is_slide_scrolling(&self, geo: &Geometry<'_>) -> bool {
        self.scrolling_slide(geo).is_some()
    }

    /// Moves `current` toward `target` by `factor`.
    ///
    /// Without looping, a target beyond the bounds pulls `current` only
    /// into a resistance zone of `(1 - edge_friction) * dom_size`; the
    /// target itself is left alone.
    pub fn lerp(&mut self, factor: f64, edge_friction: f64, geo: &Geometry<'_>) {
        let mut target = self.target;
        if !geo.can_loop() {
            let resistance = 1.0 - edge_friction.clamp(0.0, 1.0);
            let edge_space = resistance * geo.dom_size();
            let (min, max) = (geo.min(), geo.max());
            if target < min {
                target = min - ((min - target) * resistance).min(edge_space);
            } else if target > max {
                target = max + ((target - max) * resistance).min(edge_space);
            }
        }

        let distance = (target - self.current).abs();
        let mut factor = factor.clamp(0.0, 1.0);
        if factor > 0.0 && distance < FAST_LERP_THRESHOLD {
            factor += (1.0 - factor) / 3.0 * (1.0 - distance / FAST_LERP_THRESHOLD);
        }
        self.current = lerp(self.current, target, factor);
    }
}
