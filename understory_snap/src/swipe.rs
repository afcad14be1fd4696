// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter between [`understory_swipe::Swipe`] and the track.

use kurbo::Point;
use understory_swipe::{SwipeCoords, SwipeEvent, SwipeProps};
use understory_timing::Ease;

use crate::driver::Driver;
use crate::event::SnapEvent;
use crate::geometry::Geometry;
use crate::navigation::TransitionOptions;
use crate::props::{Freemode, NavDirection, SnapProps};
use crate::snap::Snap;

/// How release velocity is modified before inertia runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InertiaRegime {
    /// Pass the velocity through.
    Free,
    /// Project the velocity so inertia ends on a magnet.
    Sticky,
    /// Keep inertia inside the oversized slide being scrolled.
    Clamped,
}

pub(crate) fn swipe_props(props: &SnapProps) -> SwipeProps {
    SwipeProps {
        enabled: props.swipe,
        threshold: props.swipe_threshold,
        axis: Some(props.swipe_axis()),
        inertia_ratio: props.swipe_inertia_ratio,
        inertia_duration: props.swipe_inertia_duration,
        inertia_easing: Ease::OutCubic,
        ..SwipeProps::default()
    }
}

impl Snap {
    /// Pointer pressed. Returns `false` when swiping is disabled.
    pub fn on_pointer_down(&mut self, pos: Point, now: u64) -> bool {
        self.now = now;
        if !self.props.swipe || self.slides.is_empty() {
            return false;
        }
        if let Some(event) = self.swipe.pointer_down(pos, now) {
            self.handle_swipe_event(event);
        }
        true
    }

    /// Pointer moved. Returns `true` while a swipe is in progress.
    pub fn on_pointer_move(&mut self, pos: Point, now: u64) -> bool {
        self.now = now;
        for event in self.swipe.pointer_move(pos, now) {
            self.handle_swipe_event(event);
        }
        self.swipe.is_swiping()
    }

    /// Pointer released. Returns `true` when it ended a swipe.
    pub fn on_pointer_up(&mut self, now: u64) -> bool {
        self.now = now;
        match self.swipe.pointer_up(now) {
            Some(event) => {
                self.handle_swipe_event(event);
                true
            }
            None => false,
        }
    }

    pub(crate) fn handle_swipe_event(&mut self, event: SwipeEvent) {
        match event {
            SwipeEvent::Start(coords) => {
                self.claim(Driver::Swipe);
                self.target_index = None;
                self.swipe_origin = self.active_index;
                self.events.push(SnapEvent::SwipeStart(coords));
            }
            SwipeEvent::Move(coords) => {
                if self.driver != Driver::Swipe {
                    return;
                }
                if self.props.follow_swipe {
                    let step = self.props.swipe_axis().main(coords.step);
                    self.track.iterate_target(-step * self.props.swipe_speed);
                    self.play();
                }
                self.events.push(SnapEvent::Swipe(coords));
            }
            SwipeEvent::End(coords) => {
                self.events.push(SnapEvent::SwipeEnd(coords));
                self.swipe_end(&coords);
            }
            SwipeEvent::InertiaStart => self.play(),
            SwipeEvent::InertiaEnd => self.inertia_finished(false),
            SwipeEvent::InertiaFail => self.inertia_finished(true),
            SwipeEvent::InertiaCancel => {
                self.inertia_regime = None;
                self.release(Driver::Swipe);
            }
        }
    }

    fn swipe_end(&mut self, coords: &SwipeCoords) {
        let geo = Geometry::new(&self.slides, self.layout);
        if !geo.can_loop() {
            self.track.clamp_target(&geo);
        }
        let is_slide_scrolling = self.track.is_slide_scrolling(&geo);
        let diff = self.props.swipe_axis().main(coords.diff);
        let direction = if diff < 0.0 {
            NavDirection::Next
        } else {
            NavDirection::Prev
        };

        match self.props.freemode {
            Freemode::Plain => self.start_inertia(InertiaRegime::Free, coords),
            Freemode::Sticky => self.start_inertia(InertiaRegime::Sticky, coords),
            Freemode::Off if is_slide_scrolling && self.props.follow_swipe => {
                self.start_inertia(InertiaRegime::Clamped, coords);
            }
            Freemode::Off if !self.props.follow_swipe => {
                self.release(Driver::Swipe);
                if diff.abs() > self.props.swipe_threshold {
                    self.step_from(self.swipe_origin, direction, TransitionOptions::default());
                } else {
                    self.stick();
                }
            }
            Freemode::Off => {
                self.release(Driver::Swipe);
                let is_short = self.props.short_swipes
                    && coords.duration < self.props.short_swipes_duration
                    && diff.abs() > self.props.short_swipes_threshold;
                if is_short {
                    tracing::trace!(diff, duration = coords.duration, "short swipe");
                    self.step_from(self.swipe_origin, direction, TransitionOptions::default());
                } else {
                    self.stick();
                }
            }
        }
    }

    fn start_inertia(&mut self, regime: InertiaRegime, coords: &SwipeCoords) {
        let axis = self.props.swipe_axis();
        let velocity = self.modify_velocity(axis.main(coords.velocity), regime);
        self.inertia_regime = Some(regime);
        let event = self.swipe.start_inertia(axis.vec(velocity), self.now);
        self.handle_swipe_event(event);
    }

    /// Rewrites the release velocity (px/s, pointer space) for `regime`.
    fn modify_velocity(&self, velocity: f64, regime: InertiaRegime) -> f64 {
        let scale = self.props.swipe_inertia_ratio * self.props.swipe_speed;
        if regime == InertiaRegime::Free || scale <= 0.0 {
            return velocity;
        }
        let geo = self.geometry();
        let target = self.track.looped_target(&geo);
        let projected = target - velocity * scale;
        let landing = match regime {
            InertiaRegime::Free => projected,
            InertiaRegime::Sticky => self
                .nearest_magnet_to(projected)
                .map_or(projected, |m| projected + m.diff),
            InertiaRegime::Clamped => match self.track.scrolling_slide(&geo) {
                Some(index) => {
                    let (start, end) = self.slides[index].scroll_range(&geo);
                    projected.clamp(start, end)
                }
                None => projected,
            },
        };
        (target - landing) / scale
    }

    fn inertia_finished(&mut self, failed: bool) {
        let regime = self.inertia_regime.take();
        self.release(Driver::Swipe);
        tracing::debug!(?regime, failed, "inertia finished");
        match regime {
            Some(InertiaRegime::Sticky) => {
                self.stick();
            }
            Some(InertiaRegime::Clamped) if failed => {
                self.stick();
            }
            _ => {
                let geo = Geometry::new(&self.slides, self.layout);
                self.track.clamp_target(&geo);
                self.play();
            }
        }
    }
}
