// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe state machine: pointer tracking, start threshold, axis lock and inertia.

use kurbo::{Point, Vec2};
use understory_timing::{Ease, Timeline, TransitionDuration};

use crate::velocity::VelocityTracker;

/// A gesture axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// The X axis.
    #[default]
    Horizontal,
    /// The Y axis.
    Vertical,
}

impl Axis {
    /// The component of `v` along this axis.
    #[must_use]
    pub fn main(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// The component of `v` across this axis.
    #[must_use]
    pub fn cross(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.y,
            Self::Vertical => v.x,
        }
    }

    /// A vector with `value` on this axis and zero across it.
    #[must_use]
    pub fn vec(self, value: f64) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(value, 0.0),
            Self::Vertical => Vec2::new(0.0, value),
        }
    }
}

/// Configuration for [`Swipe`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeProps {
    /// When `false`, pointer input is ignored.
    pub enabled: bool,
    /// Distance in pixels the pointer must travel before a swipe starts.
    pub threshold: f64,
    /// Optional axis lock.
    ///
    /// When set, a gesture whose movement is dominated by the cross axis at
    /// the moment the threshold is crossed is abandoned, leaving that
    /// direction to the host (typically native page scrolling).
    pub axis: Option<Axis>,
    /// Inertia distance per unit of release velocity (px per px/s).
    pub inertia_ratio: f64,
    /// Inertia duration, usually derived from the projected distance.
    pub inertia_duration: TransitionDuration,
    /// Easing of the inertia motion.
    pub inertia_easing: Ease,
    /// Trailing window used to estimate velocity, in milliseconds.
    pub velocity_window: u64,
}

impl Default for SwipeProps {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 5.0,
            axis: None,
            inertia_ratio: 0.3,
            inertia_duration: TransitionDuration::ByDistance {
                scale: 1.0,
                min: 500.0,
                max: 2_000.0,
            },
            inertia_easing: Ease::OutCubic,
            velocity_window: 100,
        }
    }
}

/// Geometry of the swipe in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeCoords {
    /// Where the pointer went down.
    pub start: Point,
    /// Latest pointer (or inertia) position.
    pub current: Point,
    /// `current - start`.
    pub diff: Vec2,
    /// Movement since the previous event.
    pub step: Vec2,
    /// Velocity in px/s at the time of the event.
    pub velocity: Vec2,
    /// Timestamp of the event in milliseconds.
    pub timestamp: u64,
    /// Time since the pointer went down, in milliseconds.
    pub duration: u64,
}

/// Transitions reported by [`Swipe`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipeEvent {
    /// The start threshold was crossed.
    Start(SwipeCoords),
    /// The pointer (or inertia) moved.
    Move(SwipeCoords),
    /// The pointer was released after a started swipe.
    End(SwipeCoords),
    /// Inertia began.
    InertiaStart,
    /// Inertia ran to completion.
    InertiaEnd,
    /// Inertia was requested but the projected motion was negligible.
    InertiaFail,
    /// Running inertia was interrupted.
    InertiaCancel,
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Idle,
    Pending { press: Point, time: u64 },
    Active { press_time: u64 },
}

#[derive(Clone, Debug)]
struct Inertia {
    timeline: Timeline,
    distance: Vec2,
    covered: Vec2,
    last_time: u64,
}

/// Tracks one pointer gesture at a time and produces [`SwipeEvent`]s.
///
/// The host forwards pointer input; after an [`SwipeEvent::End`] it may call
/// [`Swipe::start_inertia`] with a (possibly modified) release velocity and
/// then drive the motion with [`Swipe::advance`].
#[derive(Clone, Debug)]
pub struct Swipe {
    props: SwipeProps,
    phase: Phase,
    coords: Option<SwipeCoords>,
    velocity: VelocityTracker,
    inertia: Option<Inertia>,
}

impl Swipe {
    /// Creates an idle swipe tracker.
    #[must_use]
    pub fn new(props: SwipeProps) -> Self {
        Self {
            velocity: VelocityTracker::new(props.velocity_window),
            props,
            phase: Phase::Idle,
            coords: None,
            inertia: None,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn props(&self) -> &SwipeProps {
        &self.props
    }

    /// Replaces the configuration.
    ///
    /// Disabling the tracker abandons the gesture in progress.
    pub fn update_props(&mut self, props: SwipeProps) {
        self.velocity.set_window(props.velocity_window);
        if !props.enabled {
            self.phase = Phase::Idle;
        }
        self.props = props;
    }

    /// Returns `true` while a started swipe is held down.
    #[must_use]
    pub fn is_swiping(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    /// Returns `true` while the pointer is down, started or not.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Returns `true` while inertia is running.
    #[must_use]
    pub fn has_inertia(&self) -> bool {
        self.inertia.is_some()
    }

    /// Geometry of the latest started swipe, if any.
    #[must_use]
    pub fn coords(&self) -> Option<&SwipeCoords> {
        self.coords.as_ref()
    }

    /// Pointer pressed at `pos`.
    ///
    /// Running inertia is cancelled, reported as [`SwipeEvent::InertiaCancel`].
    pub fn pointer_down(&mut self, pos: Point, now: u64) -> Option<SwipeEvent> {
        if !self.props.enabled {
            return None;
        }
        let cancelled = self.cancel_inertia();
        self.phase = Phase::Pending {
            press: pos,
            time: now,
        };
        self.velocity.reset();
        self.velocity.push(now, pos);
        cancelled
    }

    /// Pointer moved to `pos`.
    pub fn pointer_move(&mut self, pos: Point, now: u64) -> Vec<SwipeEvent> {
        let mut events = Vec::new();
        match self.phase {
            Phase::Idle => {}
            Phase::Pending { press, time } => {
                let total = pos - press;
                if total.hypot() < self.props.threshold {
                    self.velocity.push(now, pos);
                    return events;
                }
                if let Some(axis) = self.props.axis {
                    if axis.cross(total).abs() > axis.main(total).abs() {
                        tracing::trace!(?axis, "swipe abandoned: cross-axis movement dominates");
                        self.phase = Phase::Idle;
                        return events;
                    }
                }
                self.phase = Phase::Active { press_time: time };
                self.velocity.push(now, pos);
                let coords = SwipeCoords {
                    start: press,
                    current: press,
                    diff: Vec2::ZERO,
                    step: Vec2::ZERO,
                    velocity: Vec2::ZERO,
                    timestamp: now,
                    duration: now.saturating_sub(time),
                };
                self.coords = Some(coords);
                tracing::trace!(x = press.x, y = press.y, "swipe started");
                events.push(SwipeEvent::Start(coords));
                events.push(SwipeEvent::Move(self.moved_to(pos, now, time)));
            }
            Phase::Active { press_time } => {
                self.velocity.push(now, pos);
                events.push(SwipeEvent::Move(self.moved_to(pos, now, press_time)));
            }
        }
        events
    }

    /// Pointer released.
    ///
    /// Returns [`SwipeEvent::End`] only when the swipe had started.
    pub fn pointer_up(&mut self, now: u64) -> Option<SwipeEvent> {
        let phase = core::mem::replace(&mut self.phase, Phase::Idle);
        let Phase::Active { press_time } = phase else {
            return None;
        };
        let velocity = self.velocity.velocity(now);
        let coords = self.coords.as_mut()?;
        coords.step = Vec2::ZERO;
        coords.velocity = velocity;
        coords.timestamp = now;
        coords.duration = now.saturating_sub(press_time);
        Some(SwipeEvent::End(*coords))
    }

    /// Starts inertia continuing the latest swipe with `velocity` (px/s).
    ///
    /// `velocity` is usually the release velocity passed through a host
    /// velocity modifier. The projected distance is `velocity *
    /// inertia_ratio`; a projection shorter than one pixel, or a zero
    /// duration, yields [`SwipeEvent::InertiaFail`].
    pub fn start_inertia(&mut self, velocity: Vec2, now: u64) -> SwipeEvent {
        self.inertia = None;
        let distance = velocity * self.props.inertia_ratio;
        let length = distance.hypot();
        if self.coords.is_none() || !length.is_finite() || length < 1.0 {
            tracing::debug!(length, "inertia failed: negligible distance");
            return SwipeEvent::InertiaFail;
        }
        let duration = self.props.inertia_duration.resolve(length);
        if duration <= 0.0 {
            tracing::debug!("inertia failed: zero duration");
            return SwipeEvent::InertiaFail;
        }
        tracing::debug!(length, duration, "inertia started");
        self.inertia = Some(Inertia {
            timeline: Timeline::new(duration, self.props.inertia_easing),
            distance,
            covered: Vec2::ZERO,
            last_time: now,
        });
        SwipeEvent::InertiaStart
    }

    /// Advances running inertia to `now`.
    ///
    /// Emits a [`SwipeEvent::Move`] per call while inertia runs and a final
    /// [`SwipeEvent::InertiaEnd`].
    pub fn advance(&mut self, now: u64) -> Vec<SwipeEvent> {
        let mut events = Vec::new();
        let Some(inertia) = self.inertia.as_mut() else {
            return events;
        };
        let dt = now.saturating_sub(inertia.last_time) as f64;
        inertia.last_time = now;
        let progress = inertia.timeline.advance(dt);
        let position = inertia.distance * progress.eased;
        let step = position - inertia.covered;
        inertia.covered = position;
        let finished = inertia.timeline.is_finished();
        let velocity = if finished {
            Vec2::ZERO
        } else {
            inertia.distance / self.props.inertia_ratio * (1.0 - progress.eased)
        };

        if let Some(coords) = self.coords.as_mut() {
            coords.current += step;
            coords.diff += step;
            coords.step = step;
            coords.velocity = velocity;
            coords.timestamp = now;
            events.push(SwipeEvent::Move(*coords));
        }
        if finished {
            self.inertia = None;
            events.push(SwipeEvent::InertiaEnd);
        }
        events
    }

    /// Interrupts running inertia.
    pub fn cancel_inertia(&mut self) -> Option<SwipeEvent> {
        self.inertia.take().map(|_| {
            tracing::debug!("inertia cancelled");
            SwipeEvent::InertiaCancel
        })
    }

    fn moved_to(&mut self, pos: Point, now: u64, press_time: u64) -> SwipeCoords {
        let velocity = self.velocity.velocity(now);
        let coords = self.coords.get_or_insert(SwipeCoords {
            start: pos,
            current: pos,
            diff: Vec2::ZERO,
            step: Vec2::ZERO,
            velocity,
            timestamp: now,
            duration: 0,
        });
        coords.step = pos - coords.current;
        coords.current = pos;
        coords.diff = pos - coords.start;
        coords.velocity = velocity;
        coords.timestamp = now;
        coords.duration = now.saturating_sub(press_time);
        *coords
    }
}

impl Default for Swipe {
    fn default() -> Self {
        Self::new(SwipeProps::default())
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::{Axis, Swipe, SwipeEvent, SwipeProps};

    fn moves(events: &[SwipeEvent]) -> Vec<Vec2> {
        events
            .iter()
            .filter_map(|e| match e {
                SwipeEvent::Move(c) => Some(c.step),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn below_threshold_does_not_start() {
        let mut swipe = Swipe::default();
        swipe.pointer_down(Point::new(0.0, 0.0), 0);
        assert!(swipe.pointer_move(Point::new(3.0, 0.0), 10).is_empty());
        assert!(!swipe.is_swiping());
        assert_eq!(swipe.pointer_up(20), None);
    }

    #[test]
    fn start_then_move_reports_steps() {
        let mut swipe = Swipe::default();
        swipe.pointer_down(Point::new(0.0, 0.0), 0);
        let events = swipe.pointer_move(Point::new(10.0, 0.0), 10);
        assert!(matches!(events[0], SwipeEvent::Start(_)));
        assert_eq!(moves(&events), vec![Vec2::new(10.0, 0.0)]);

        let events = swipe.pointer_move(Point::new(25.0, 0.0), 20);
        assert_eq!(moves(&events), vec![Vec2::new(15.0, 0.0)]);
        assert_eq!(swipe.coords().map(|c| c.diff), Some(Vec2::new(25.0, 0.0)));
    }

    #[test]
    fn axis_lock_abandons_cross_axis_gestures() {
        let mut swipe = Swipe::new(SwipeProps {
            axis: Some(Axis::Horizontal),
            ..SwipeProps::default()
        });
        swipe.pointer_down(Point::new(0.0, 0.0), 0);
        assert!(swipe.pointer_move(Point::new(2.0, 20.0), 10).is_empty());
        assert!(!swipe.is_pressed());
        assert!(swipe.pointer_move(Point::new(50.0, 20.0), 20).is_empty());
    }

    #[test]
    fn release_reports_duration_and_velocity() {
        let mut swipe = Swipe::default();
        swipe.pointer_down(Point::new(0.0, 0.0), 0);
        swipe.pointer_move(Point::new(10.0, 0.0), 10);
        swipe.pointer_move(Point::new(20.0, 0.0), 20);
        let Some(SwipeEvent::End(coords)) = swipe.pointer_up(20) else {
            panic!("expected end event");
        };
        assert_eq!(coords.duration, 20);
        assert!((coords.velocity.x - 1_000.0).abs() < 1e-9);
        assert!(!swipe.is_swiping());
    }

    #[test]
    fn inertia_covers_projected_distance() {
        let mut swipe = Swipe::new(SwipeProps {
            inertia_ratio: 0.5,
            ..SwipeProps::default()
        });
        swipe.pointer_down(Point::new(0.0, 0.0), 0);
        swipe.pointer_move(Point::new(10.0, 0.0), 10);
        swipe.pointer_up(10);

        assert_eq!(
            swipe.start_inertia(Vec2::new(1_000.0, 0.0), 100),
            SwipeEvent::InertiaStart
        );
        let mut covered = 0.0;
        let mut ended = false;
        let mut now = 100;
        while !ended && now < 5_000 {
            now += 16;
            for event in swipe.advance(now) {
                match event {
                    SwipeEvent::Move(c) => covered += c.step.x,
                    SwipeEvent::InertiaEnd => ended = true,
                    _ => {}
                }
            }
        }
        assert!(ended);
        assert!((covered - 500.0).abs() < 1e-6);
        assert!(!swipe.has_inertia());
    }

    #[test]
    fn negligible_inertia_fails() {
        let mut swipe = Swipe::default();
        swipe.pointer_down(Point::new(0.0, 0.0), 0);
        swipe.pointer_move(Point::new(10.0, 0.0), 10);
        swipe.pointer_up(10);
        assert_eq!(
            swipe.start_inertia(Vec2::new(1.0, 0.0), 10),
            SwipeEvent::InertiaFail
        );
    }

    #[test]
    fn pointer_down_cancels_inertia() {
        let mut swipe = Swipe::default();
        swipe.pointer_down(Point::new(0.0, 0.0), 0);
        swipe.pointer_move(Point::new(10.0, 0.0), 10);
        swipe.pointer_up(10);
        swipe.start_inertia(Vec2::new(2_000.0, 0.0), 10);
        assert!(swipe.has_inertia());
        assert_eq!(
            swipe.pointer_down(Point::new(5.0, 5.0), 30),
            Some(SwipeEvent::InertiaCancel)
        );
        assert!(!swipe.has_inertia());
    }

    #[test]
    fn disabled_ignores_input() {
        let mut swipe = Swipe::new(SwipeProps {
            enabled: false,
            ..SwipeProps::default()
        });
        assert_eq!(swipe.pointer_down(Point::new(0.0, 0.0), 0), None);
        assert!(swipe.pointer_move(Point::new(100.0, 0.0), 10).is_empty());
    }
}
