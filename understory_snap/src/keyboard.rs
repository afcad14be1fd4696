// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard focus: native container scrolls become slide navigation.

use crate::navigation::TransitionOptions;
use crate::snap::Snap;

/// Offsets smaller than this are rounding noise.
const NATIVE_SCROLL_EPSILON: f64 = 0.5;

impl Snap {
    /// Reacts to a native scroll of the container by `offset` pixels along
    /// the scroll axis.
    ///
    /// Moving keyboard focus into an off-screen slide makes the host scroll
    /// the container natively. This navigates to the slide under that offset
    /// instead. Returns `true` when the host should reset its native scroll
    /// position to zero.
    pub fn on_native_scroll(&mut self, offset: f64) -> bool {
        if !offset.is_finite() || offset.abs() < NATIVE_SCROLL_EPSILON {
            return false;
        }
        let found = self
            .slides
            .iter()
            .position(|slide| slide.coord() <= offset && offset < slide.coord() + slide.size());
        tracing::debug!(offset, ?found, "native scroll reset");
        if let Some(index) = found {
            self.to_slide(index, TransitionOptions::default());
        }
        true
    }
}
