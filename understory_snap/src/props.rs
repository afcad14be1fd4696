// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap configuration.

use understory_swipe::Axis;
use understory_timing::{Ease, TransitionDuration};

use crate::length::{Length, SlideSize};
use crate::viewport::Viewport;

/// Scroll axis of the carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Slides are laid out left to right.
    #[default]
    Horizontal,
    /// Slides are laid out top to bottom.
    Vertical,
}

impl Direction {
    /// The gesture axis matching this direction.
    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis::Horizontal,
            Self::Vertical => Axis::Vertical,
        }
    }
}

/// Snapping behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Freemode {
    /// Always settle on a magnet.
    #[default]
    Off,
    /// Never snap; the track rests wherever input leaves it.
    Plain,
    /// Scroll freely, but project inertia so it comes to rest on a magnet.
    Sticky,
}

/// Which input component drives the carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputAxis {
    /// For swipes: the carousel direction. For wheels: the dominant component.
    #[default]
    Auto,
    /// The X component.
    Horizontal,
    /// The Y component.
    Vertical,
}

/// Cool-down between wheel-driven slide steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WheelThrottle {
    /// Suppress steps while a transition runs, while scrolling inside an
    /// oversized slide, or for 500ms after the previous step.
    #[default]
    Auto,
    /// Suppress steps for this many milliseconds after the previous one.
    Millis(u64),
}

/// Direction of a programmatic navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavDirection {
    /// Toward higher indices / larger coordinates.
    Next,
    /// Toward lower indices / smaller coordinates.
    Prev,
}

/// Configuration of a [`Snap`](crate::Snap).
///
/// Every field is plain data. Use [`SnapProps::for_viewport`] to get the
/// device-dependent defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnapProps {
    /// Scroll axis.
    pub direction: Direction,
    /// Magnets center slides in the container instead of aligning their
    /// leading edges.
    pub centered: bool,
    /// Wrap around after the last slide.
    pub looped: bool,
    /// Without looping, `next` on the last slide goes to the first (and
    /// `prev` on the first to the last).
    pub rewind: bool,
    /// Snapping behavior.
    pub freemode: Freemode,
    /// Space between slides.
    pub gap: Length,
    /// Size of slides created by [`Snap::from_count`](crate::Snap::from_count).
    pub slide_size: SlideSize,
    /// Initially active slide.
    pub active_index: usize,
    /// Per-60fps ease of `current` toward `target`.
    pub lerp: f64,
    /// Per-60fps strength of the pull toward the nearest magnet. Zero
    /// disables it.
    pub friction: f64,
    /// Edge resistance: `1` is a hard wall, `0` lets the track overshoot
    /// by a full container.
    pub edge_friction: f64,
    /// Duration of programmatic transitions.
    pub duration: TransitionDuration,
    /// Easing of programmatic transitions.
    pub easing: Ease,
    /// Snap back onto the active slide after a reflow.
    pub stick_on_resize: bool,
    /// Delay between a container resize and the reflow, in milliseconds.
    pub resize_debounce: u64,
    /// Default step of `next`/`prev`.
    pub slides_to_scroll: usize,

    /// Enable pointer swipes.
    pub swipe: bool,
    /// Multiplier on swipe distance.
    pub swipe_speed: f64,
    /// Axis read from pointer input.
    pub swipe_axis: InputAxis,
    /// Move the track with the pointer; otherwise only step on release.
    pub follow_swipe: bool,
    /// Quick flicks step one slide instead of sticking.
    pub short_swipes: bool,
    /// Longest swipe still considered short, in milliseconds.
    pub short_swipes_duration: u64,
    /// Shortest distance a short swipe must cover, in pixels.
    pub short_swipes_threshold: f64,
    /// Keep the magnet pull active while swiping.
    pub swipe_friction: bool,
    /// Per-60fps ease used while swiping or during inertia.
    pub swipe_lerp: f64,
    /// Distance before a pointer gesture becomes a swipe; also the distance
    /// a non-following swipe needs to step.
    pub swipe_threshold: f64,
    /// Inertia distance per unit of release velocity.
    pub swipe_inertia_ratio: f64,
    /// Duration of swipe inertia.
    pub swipe_inertia_duration: TransitionDuration,

    /// Enable wheel input.
    pub wheel: bool,
    /// Multiplier on wheel deltas.
    pub wheel_speed: f64,
    /// Axis read from wheel input.
    pub wheel_axis: InputAxis,
    /// Move the track with the wheel; otherwise step whole slides.
    pub follow_wheel: bool,
    /// Cool-down between wheel steps.
    pub wheel_throttle: WheelThrottle,
    /// Settle on a magnet (or the next slide) once a wheel burst ends.
    pub stick_on_wheel_end: bool,
    /// Distance past a magnet that makes a wheel burst end on the next slide.
    pub stick_on_wheel_end_threshold: f64,
}

impl Default for SnapProps {
    fn default() -> Self {
        Self {
            direction: Direction::Horizontal,
            centered: false,
            looped: false,
            rewind: false,
            freemode: Freemode::Off,
            gap: Length::px(0.0),
            slide_size: SlideSize::Auto,
            active_index: 0,
            lerp: 0.2,
            friction: 0.0,
            edge_friction: 0.85,
            duration: TransitionDuration::Fixed(500.0),
            easing: Ease::OutCubic,
            stick_on_resize: true,
            resize_debounce: 0,
            slides_to_scroll: 1,

            swipe: true,
            swipe_speed: 1.0,
            swipe_axis: InputAxis::Auto,
            follow_swipe: true,
            short_swipes: true,
            short_swipes_duration: 300,
            short_swipes_threshold: 30.0,
            swipe_friction: false,
            swipe_lerp: 0.6,
            swipe_threshold: 5.0,
            swipe_inertia_ratio: 0.3,
            swipe_inertia_duration: TransitionDuration::ByDistance {
                scale: 1.0,
                min: 500.0,
                max: 2_000.0,
            },

            wheel: false,
            wheel_speed: 1.0,
            wheel_axis: InputAxis::Auto,
            follow_wheel: true,
            wheel_throttle: WheelThrottle::Auto,
            stick_on_wheel_end: true,
            stick_on_wheel_end_threshold: 30.0,
        }
    }
}

impl SnapProps {
    /// Defaults for the given device: mobile devices follow the finger
    /// without smoothing.
    #[must_use]
    pub fn for_viewport(viewport: &Viewport) -> Self {
        Self {
            swipe_lerp: if viewport.is_mobile { 1.0 } else { 0.6 },
            ..Self::default()
        }
    }

    /// Returns a copy with out-of-range values brought back into range.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        fn unit(value: f64, fallback: f64) -> f64 {
            if value.is_finite() { value.clamp(0.0, 1.0) } else { fallback }
        }
        fn non_negative(value: f64, fallback: f64) -> f64 {
            if value.is_finite() { value.max(0.0) } else { fallback }
        }
        let defaults = Self::default();
        self.lerp = unit(self.lerp, defaults.lerp);
        self.friction = unit(self.friction, defaults.friction);
        self.edge_friction = unit(self.edge_friction, defaults.edge_friction);
        self.swipe_lerp = unit(self.swipe_lerp, defaults.swipe_lerp);
        self.swipe_speed = non_negative(self.swipe_speed, defaults.swipe_speed);
        self.wheel_speed = non_negative(self.wheel_speed, defaults.wheel_speed);
        self.swipe_threshold = non_negative(self.swipe_threshold, defaults.swipe_threshold);
        self.swipe_inertia_ratio =
            non_negative(self.swipe_inertia_ratio, defaults.swipe_inertia_ratio);
        self.short_swipes_threshold =
            non_negative(self.short_swipes_threshold, defaults.short_swipes_threshold);
        self.stick_on_wheel_end_threshold = non_negative(
            self.stick_on_wheel_end_threshold,
            defaults.stick_on_wheel_end_threshold,
        );
        self.slides_to_scroll = self.slides_to_scroll.max(1);
        self
    }

    /// Axis used to read pointer movement.
    #[must_use]
    pub fn swipe_axis(&self) -> Axis {
        match self.swipe_axis {
            InputAxis::Auto => self.direction.axis(),
            InputAxis::Horizontal => Axis::Horizontal,
            InputAxis::Vertical => Axis::Vertical,
        }
    }
}

#[cfg(test)]
mod tests {
    use understory_swipe::Axis;

    use super::{Direction, InputAxis, SnapProps};
    use crate::viewport::Viewport;

    #[test]
    fn mobile_follows_the_finger() {
        let mobile = Viewport::default().with_mobile(true);
        assert_eq!(SnapProps::for_viewport(&mobile).swipe_lerp, 1.0);
        assert_eq!(SnapProps::for_viewport(&Viewport::default()).swipe_lerp, 0.6);
    }

    #[test]
    fn sanitize_clamps_factors() {
        let props = SnapProps {
            lerp: 4.0,
            edge_friction: -1.0,
            friction: f64::NAN,
            slides_to_scroll: 0,
            ..SnapProps::default()
        }
        .sanitized();
        assert_eq!(props.lerp, 1.0);
        assert_eq!(props.edge_friction, 0.0);
        assert_eq!(props.friction, 0.0);
        assert_eq!(props.slides_to_scroll, 1);
    }

    #[test]
    fn swipe_axis_follows_direction() {
        let props = SnapProps {
            direction: Direction::Vertical,
            ..SnapProps::default()
        };
        assert_eq!(props.swipe_axis(), Axis::Vertical);
        let props = SnapProps {
            swipe_axis: InputAxis::Horizontal,
            ..props
        };
        assert_eq!(props.swipe_axis(), Axis::Horizontal);
    }
}
