// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only layout view shared by the track and the slides.

use crate::slide::Slide;

/// Resolved layout inputs of one reflow.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    /// Container extent along the scroll axis.
    pub dom_size: f64,
    /// Resolved gap between slides, in pixels.
    pub gap: f64,
    /// Magnets center slides.
    pub centered: bool,
    /// Looping was requested. See [`Geometry::can_loop`].
    pub looped: bool,
}

/// A borrowed view of the slides plus the layout they were reflowed with.
///
/// Bounds are recomputed on every call; nothing here is cached.
#[derive(Clone, Copy, Debug)]
pub struct Geometry<'a> {
    slides: &'a [Slide],
    layout: Layout,
}

impl<'a> Geometry<'a> {
    /// Creates a view over `slides`.
    #[must_use]
    pub fn new(slides: &'a [Slide], layout: Layout) -> Self {
        Self { slides, layout }
    }

    /// The slides.
    #[must_use]
    pub fn slides(&self) -> &'a [Slide] {
        self.slides
    }

    /// The layout.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Container extent along the scroll axis.
    #[must_use]
    pub fn dom_size(&self) -> f64 {
        self.layout.dom_size
    }

    /// Returns `true` when the track actually wraps around: looping was
    /// requested and there are at least two slides.
    #[must_use]
    pub fn can_loop(&self) -> bool {
        self.layout.looped && self.slides.len() >= 2
    }

    /// Total extent of one loop: every slide plus a trailing gap each.
    #[must_use]
    pub fn period(&self) -> f64 {
        self.slides
            .last()
            .map_or(0.0, |last| last.static_coord() + last.size() + self.layout.gap)
    }

    /// Size of the first slide, the reference for centered magnets.
    #[must_use]
    pub fn first_size(&self) -> f64 {
        self.slides.first().map_or(0.0, Slide::size)
    }

    /// Offset added to live coordinates so that, at rest on a magnet, the
    /// magnet's slide is centered.
    #[must_use]
    pub fn center_offset(&self) -> f64 {
        if self.layout.centered {
            (self.layout.dom_size - self.first_size()) / 2.0
        } else {
            0.0
        }
    }

    /// Lower bound of the track.
    ///
    /// Zero, except for a centered, non-looping track whose first slide is
    /// larger than the container: its leading edge lies below zero.
    #[must_use]
    pub fn min(&self) -> f64 {
        if self.can_loop() || !self.layout.centered {
            return 0.0;
        }
        let overflow = (self.first_size() - self.layout.dom_size).max(0.0);
        -overflow / 2.0
    }

    /// Upper bound of the track.
    #[must_use]
    pub fn max(&self) -> f64 {
        if self.can_loop() {
            return self.period();
        }
        let Some(last) = self.slides.last() else {
            return 0.0;
        };
        let dom = self.layout.dom_size;
        if self.layout.centered {
            let base = last.static_coord() + last.size() / 2.0 - self.first_size() / 2.0;
            let overflow = (last.size() - dom).max(0.0);
            (base + overflow / 2.0).max(self.min())
        } else {
            (last.static_coord() + last.size() - dom).max(0.0)
        }
    }

    /// Wraps `coord` into `[min, max)` when the track loops.
    #[must_use]
    pub fn loop_coord(&self, coord: f64) -> f64 {
        if !self.can_loop() {
            return coord;
        }
        let period = self.period();
        if period <= 0.0 {
            return coord;
        }
        coord.rem_euclid(period)
    }
}
