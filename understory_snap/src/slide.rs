// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slides: resolved size, layout position, live position and magnets.

use core::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

use crate::error::{SnapError, SnapResult};
use crate::geometry::Geometry;
use crate::length::SlideSize;
use crate::snap::SnapId;

/// Tolerance used when deciding whether a live coordinate lies inside a
/// scroll range.
const EDGE_EPSILON: f64 = 1e-6;

/// Candidate snap coordinates of one slide.
pub type Magnets = SmallVec<[f64; 4]>;

/// Unique identifier of a [`Slide`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlideId(u64);

impl SlideId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw identifier.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// How a slide is sized and mounted.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideProps {
    /// Size along the scroll axis.
    pub size: SlideSize,
    /// The host mounts the slide only while it is visible, following
    /// [`SnapEvent::SlideMount`](crate::SnapEvent::SlideMount) and
    /// [`SnapEvent::SlideUnmount`](crate::SnapEvent::SlideUnmount).
    pub is_virtual: bool,
}

/// One carousel item.
///
/// Slides are owned by at most one [`Snap`](crate::Snap). Everything but the
/// props and the measured size is written by the owner during reflow and
/// render and is read-only for hosts.
#[derive(Clone, Debug)]
pub struct Slide {
    id: SlideId,
    props: SlideProps,
    owner: Option<SnapId>,
    index: usize,
    measured: Option<f64>,
    size: f64,
    static_coord: f64,
    coord: f64,
    progress: f64,
    is_visible: bool,
}

impl Slide {
    /// Creates a slide.
    ///
    /// Virtual slides must not be [`SlideSize::Auto`]: whether they are
    /// visible has to be known before they were ever mounted and measured.
    pub fn new(props: SlideProps) -> SnapResult<Self> {
        if props.is_virtual && props.size.is_auto() {
            return Err(SnapError::VirtualSlideSize);
        }
        Ok(Self {
            id: SlideId::next(),
            props,
            owner: None,
            index: 0,
            measured: None,
            size: 0.0,
            static_coord: 0.0,
            coord: 0.0,
            progress: 0.0,
            is_visible: false,
        })
    }

    /// A regular (non-virtual) slide.
    #[must_use]
    pub fn with_size(size: SlideSize) -> Self {
        Self {
            id: SlideId::next(),
            props: SlideProps {
                size,
                is_virtual: false,
            },
            owner: None,
            index: 0,
            measured: None,
            size: 0.0,
            static_coord: 0.0,
            coord: 0.0,
            progress: 0.0,
            is_visible: false,
        }
    }

    /// A regular slide of `px` pixels.
    #[must_use]
    pub fn fixed(px: f64) -> Self {
        Self::with_size(SlideSize::Fixed(px))
    }

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> SlideId {
        self.id
    }

    /// Configuration.
    #[must_use]
    pub fn props(&self) -> &SlideProps {
        &self.props
    }

    /// The snap this slide is attached to.
    #[must_use]
    pub fn owner(&self) -> Option<SnapId> {
        self.owner
    }

    /// Position in the owner's slide list.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Last host-reported element size along the scroll axis.
    #[must_use]
    pub fn measured(&self) -> Option<f64> {
        self.measured
    }

    /// Resolved size in pixels.
    #[must_use]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Layout position assuming the track never scrolled.
    #[must_use]
    pub fn static_coord(&self) -> f64 {
        self.static_coord
    }

    /// Live position relative to the container's leading edge.
    #[must_use]
    pub fn coord(&self) -> f64 {
        self.coord
    }

    /// Normalized position: `0` when resting at the aligned edge, negative
    /// while upcoming, positive once passed.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether any part of the slide overlaps the container.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// Returns `true` when the host should observe the element's size and
    /// report it through [`Snap::resize_slide`](crate::Snap::resize_slide).
    #[must_use]
    pub fn is_observed(&self) -> bool {
        self.owner.is_some() && self.props.size.is_auto()
    }

    /// Snap coordinates of this slide, base magnet first.
    ///
    /// In loop mode slide 0 additionally offers the track's upper bound,
    /// which is the same position one period later.
    #[must_use]
    pub fn magnets(&self, geo: &Geometry<'_>) -> Magnets {
        let mut magnets = self.base_magnets(geo);
        if geo.can_loop() && self.index == 0 {
            magnets.push(geo.max());
        }
        magnets
    }

    /// [`Slide::magnets`] without the loop wrap-around magnet.
    #[must_use]
    pub fn base_magnets(&self, geo: &Geometry<'_>) -> Magnets {
        let mut magnets = Magnets::new();
        let overflow = self.overflow(geo);
        if geo.layout().centered {
            let base = self.static_coord + self.size / 2.0 - geo.first_size() / 2.0;
            magnets.push(base);
            if overflow > 0.0 {
                magnets.push(base - overflow / 2.0);
                magnets.push(base + overflow / 2.0);
            }
        } else {
            magnets.push(self.static_coord);
            if overflow > 0.0 {
                magnets.push(self.static_coord + overflow);
            }
        }

        if geo.can_loop() {
            for magnet in &mut magnets {
                *magnet = geo.loop_coord(*magnet);
            }
        } else if !geo.layout().centered {
            let max = geo.max();
            for magnet in &mut magnets {
                *magnet = magnet.clamp(0.0, max);
            }
        }
        magnets
    }

    /// How far the slide exceeds the container, or zero.
    #[must_use]
    pub fn overflow(&self, geo: &Geometry<'_>) -> f64 {
        (self.size - geo.dom_size()).max(0.0)
    }

    /// Returns `true` when the slide is larger than the container.
    #[must_use]
    pub fn is_oversized(&self, geo: &Geometry<'_>) -> bool {
        self.overflow(geo) > 0.0
    }

    /// Track range across which an oversized slide scrolls internally, in
    /// unwrapped track coordinates.
    #[must_use]
    pub fn scroll_range(&self, geo: &Geometry<'_>) -> (f64, f64) {
        let overflow = self.overflow(geo);
        let start = if geo.layout().centered {
            self.static_coord + self.size / 2.0 - geo.first_size() / 2.0 - overflow / 2.0
        } else {
            self.static_coord
        };
        (start, start + overflow)
    }

    /// Live coordinate for a track position.
    #[must_use]
    pub fn live_coord(&self, current: f64, geo: &Geometry<'_>) -> f64 {
        let coord = self.static_coord - current + geo.center_offset();
        if !geo.can_loop() {
            return coord;
        }
        let period = geo.period();
        if period <= 0.0 {
            return coord;
        }
        (coord + self.size).rem_euclid(period) - self.size
    }

    /// Returns `true` when an oversized slide fills the container at
    /// `current`, so input scrolls inside it.
    #[must_use]
    pub fn is_scrolling_at(&self, current: f64, geo: &Geometry<'_>) -> bool {
        if !self.is_oversized(geo) {
            return false;
        }
        let coord = self.live_coord(current, geo);
        coord >= geo.dom_size() - self.size - EDGE_EPSILON && coord <= EDGE_EPSILON
    }

    /// Live coordinate, progress and visibility at `current`.
    pub(crate) fn layout_at(&self, current: f64, geo: &Geometry<'_>) -> (f64, f64, bool) {
        let coord = self.live_coord(current, geo);
        let dom = geo.dom_size();
        let edge = if geo.layout().centered {
            (dom - self.size) / 2.0
        } else {
            0.0
        };
        let progress = if self.size > 0.0 {
            (edge - coord) / self.size
        } else {
            0.0
        };
        let visible = coord + self.size > 0.0 && coord < dom;
        (coord, progress, visible)
    }

    pub(crate) fn attach(&mut self, owner: SnapId, index: usize) {
        self.owner = Some(owner);
        self.index = index;
    }

    pub(crate) fn detach(&mut self) {
        self.owner = None;
        self.is_visible = false;
    }

    pub(crate) fn set_measured(&mut self, measured: f64) {
        self.measured = Some(measured);
    }

    pub(crate) fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    pub(crate) fn set_static_coord(&mut self, coord: f64) {
        self.static_coord = coord;
    }

    /// Applies a render result; returns `true` when visibility changed.
    pub(crate) fn set_layout(&mut self, coord: f64, progress: f64, is_visible: bool) -> bool {
        self.coord = coord;
        self.progress = progress;
        let changed = self.is_visible != is_visible;
        self.is_visible = is_visible;
        changed
    }
}
