// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events queued for the host.

use understory_swipe::SwipeCoords;
use understory_timing::TimelineProgress;

use crate::slide::SlideId;

/// Notifications queued by a [`Snap`](crate::Snap), drained with
/// [`Snap::drain_events`](crate::Snap::drain_events) in emission order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnapEvent {
    /// A reflow finished.
    Resize,
    /// Static coordinates and bounds were recomputed.
    Reflow,
    /// Slides were rendered at a new track position.
    Update,
    /// The active slide changed.
    ActiveSlide {
        /// New active index.
        index: usize,
        /// Previous active index.
        previous: usize,
    },
    /// A swipe crossed its start threshold.
    SwipeStart(SwipeCoords),
    /// A swipe (or its inertia) moved.
    Swipe(SwipeCoords),
    /// The pointer was released.
    SwipeEnd(SwipeCoords),
    /// A wheel burst started.
    WheelStart,
    /// A wheel event was applied. `delta` is in pixels along the scroll axis.
    Wheel {
        /// Decoded delta.
        delta: f64,
    },
    /// A wheel burst ended.
    WheelEnd,
    /// A programmatic transition started.
    TimelineStart,
    /// A programmatic transition advanced.
    TimelineUpdate(TimelineProgress),
    /// A programmatic transition completed.
    TimelineEnd,
    /// A virtual slide became visible and should be mounted.
    SlideMount(SlideId),
    /// A virtual slide left the container and may be unmounted.
    SlideUnmount(SlideId),
}
