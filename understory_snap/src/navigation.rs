// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Programmatic navigation: scripted transitions to coordinates and slides.

use core::fmt;

use understory_timing::{Ease, Timeline, TimelineProgress, TransitionDuration, lerp};

use crate::driver::Driver;
use crate::event::SnapEvent;
use crate::geometry::Geometry;
use crate::props::NavDirection;
use crate::snap::Snap;

type StartFn = Box<dyn FnOnce()>;
type UpdateFn = Box<dyn FnMut(TimelineProgress)>;
type EndFn = Box<dyn FnOnce()>;

/// Options of a programmatic transition.
///
/// Unset fields fall back to the snap's props.
#[derive(Default)]
pub struct TransitionOptions {
    /// Duration; defaults to [`SnapProps::duration`](crate::SnapProps::duration).
    pub duration: Option<TransitionDuration>,
    /// Easing; defaults to [`SnapProps::easing`](crate::SnapProps::easing).
    pub easing: Option<Ease>,
    /// Approach side for [`Snap::to_slide`].
    pub direction: Option<NavDirection>,
    /// Slides to skip for [`Snap::next`] / [`Snap::prev`]; defaults to
    /// [`SnapProps::slides_to_scroll`](crate::SnapProps::slides_to_scroll).
    pub skip: Option<usize>,
    on_start: Option<StartFn>,
    on_update: Option<UpdateFn>,
    on_end: Option<EndFn>,
}

impl TransitionOptions {
    /// Sets the duration.
    #[must_use]
    pub fn duration(mut self, duration: impl Into<TransitionDuration>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Sets the easing.
    #[must_use]
    pub fn easing(mut self, easing: Ease) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Sets the approach side.
    #[must_use]
    pub fn direction(mut self, direction: NavDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Sets the step of `next` / `prev`.
    #[must_use]
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Called once when the transition starts.
    #[must_use]
    pub fn on_start(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Called on every step of the transition.
    #[must_use]
    pub fn on_update(mut self, f: impl FnMut(TimelineProgress) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Called once when the transition completes. Not called when it is
    /// cancelled.
    #[must_use]
    pub fn on_end(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for TransitionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionOptions")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("direction", &self.direction)
            .field("skip", &self.skip)
            .field("on_start", &self.on_start.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}

/// A running scripted transition.
pub(crate) struct Transition {
    timeline: Timeline,
    from: f64,
    to: f64,
    on_update: Option<UpdateFn>,
    on_end: Option<EndFn>,
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("timeline", &self.timeline)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

impl Snap {
    /// Transitions the track to `coord`.
    ///
    /// Returns `false` when there are no slides. A zero duration completes
    /// synchronously.
    pub fn to_coord(&mut self, coord: f64, options: TransitionOptions) -> bool {
        self.transition_to(coord, options, None)
    }

    /// Transitions to the slide at `index`.
    ///
    /// Out-of-range indices wrap when looping and saturate otherwise. An
    /// index equal to the active one sticks to the nearest magnet instead
    /// and returns `false`.
    pub fn to_slide(&mut self, index: usize, options: TransitionOptions) -> bool {
        let len = self.slides.len();
        if len == 0 {
            return false;
        }
        let looping = self.geometry().can_loop();
        let index = if looping { index % len } else { index.min(len - 1) };
        if index == self.active_index {
            self.stick();
            return false;
        }

        let geo = Geometry::new(&self.slides, self.layout);
        let magnets = self.slides[index].base_magnets(&geo);
        let fallback = magnets.first().copied().unwrap_or_default();
        let magnet = match options.direction {
            Some(NavDirection::Next) => magnets.iter().copied().reduce(f64::min),
            Some(NavDirection::Prev) => magnets.iter().copied().reduce(f64::max),
            None => None,
        }
        .unwrap_or(fallback);

        let coord = if looping {
            self.nearest_image(magnet, options.direction, &geo)
        } else {
            magnet
        };
        tracing::debug!(index, coord, "to slide");
        self.transition_to(coord, options, Some(index))
    }

    /// Picks the periodic image of `magnet` closest to the track, honoring
    /// the approach side, and returns it in unwrapped track coordinates.
    fn nearest_image(&self, magnet: f64, direction: Option<NavDirection>, geo: &Geometry<'_>) -> f64 {
        let period = geo.period();
        let looped = self.track.looped_current(geo);
        let images = [magnet - period, magnet, magnet + period];
        let allowed = |c: &f64| match direction {
            Some(NavDirection::Next) => *c >= looped,
            Some(NavDirection::Prev) => *c <= looped,
            None => true,
        };
        let pick = |filter: bool| {
            images
                .iter()
                .copied()
                .filter(|c| !filter || allowed(c))
                .min_by(|a, b| (a - looped).abs().total_cmp(&(b - looped).abs()))
        };
        let image = pick(true).or_else(|| pick(false)).unwrap_or(magnet);
        self.track.current() + (image - looped)
    }

    /// Moves forward by `skip` slides (default
    /// [`SnapProps::slides_to_scroll`](crate::SnapProps::slides_to_scroll)).
    pub fn next(&mut self, options: TransitionOptions) -> bool {
        self.step(NavDirection::Next, options)
    }

    /// Moves backward by `skip` slides.
    pub fn prev(&mut self, options: TransitionOptions) -> bool {
        self.step(NavDirection::Prev, options)
    }

    /// Steps count from the slide a running transition is heading to, so
    /// repeated calls accumulate.
    pub(crate) fn step(&mut self, direction: NavDirection, options: TransitionOptions) -> bool {
        let from = match self.transition {
            Some(_) => self.target_index.unwrap_or(self.active_index),
            None => self.active_index,
        };
        self.step_from(from, direction, options)
    }

    pub(crate) fn step_from(
        &mut self,
        from: usize,
        direction: NavDirection,
        mut options: TransitionOptions,
    ) -> bool {
        let len = self.slides.len();
        if len == 0 {
            return false;
        }
        let skip = options.skip.unwrap_or(self.props.slides_to_scroll).max(1);
        let looping = self.geometry().can_loop();
        let last = len - 1;
        let forward = from.checked_add(skip).filter(|index| *index <= last);
        let (index, wrapped) = match (direction, forward) {
            (NavDirection::Next, Some(index)) => (index, false),
            (NavDirection::Next, None) if looping => ((from + skip % len) % len, false),
            (NavDirection::Next, None) if self.props.rewind && from == last => (0, true),
            (NavDirection::Next, None) => (last, false),
            (NavDirection::Prev, _) if from >= skip => (from - skip, false),
            (NavDirection::Prev, _) if looping => ((from + len - skip % len) % len, false),
            (NavDirection::Prev, _) if self.props.rewind && from == 0 => (last, true),
            (NavDirection::Prev, _) => (0, false),
        };
        if !wrapped && options.direction.is_none() {
            options.direction = Some(direction);
        }
        self.to_slide(index, options)
    }

    /// Transitions to the nearest magnet.
    ///
    /// Returns `false` when there are no slides or while scrolling inside an
    /// oversized slide.
    pub fn stick(&mut self) -> bool {
        let geo = self.geometry();
        if self.slides.is_empty() || self.track.is_slide_scrolling(&geo) {
            return false;
        }
        let Some(magnet) = self.nearest_magnet() else {
            return false;
        };
        let coord = self.track.current() + magnet.diff;
        self.transition_to(coord, TransitionOptions::default(), Some(magnet.index))
    }

    /// Halts a running transition where it is. Swipe inertia is not affected.
    pub fn cancel_transition(&mut self) {
        if self.transition.take().is_some() {
            tracing::debug!("transition cancelled");
            self.release(Driver::Timeline);
        }
        self.target_index = None;
    }

    pub(crate) fn transition_to(
        &mut self,
        coord: f64,
        mut options: TransitionOptions,
        target_index: Option<usize>,
    ) -> bool {
        if self.slides.is_empty() || !coord.is_finite() {
            return false;
        }
        self.cancel_transition();
        self.claim(Driver::Timeline);
        self.target_index = target_index;

        let from = self.track.current();
        let duration = options
            .duration
            .unwrap_or(self.props.duration)
            .resolve((coord - from).abs());
        let easing = options.easing.unwrap_or(self.props.easing);
        tracing::debug!(from, to = coord, duration, "transition started");
        if let Some(on_start) = options.on_start.take() {
            on_start();
        }
        self.events.push(SnapEvent::TimelineStart);
        self.transition = Some(Transition {
            timeline: Timeline::new(duration, easing),
            from,
            to: coord,
            on_update: options.on_update.take(),
            on_end: options.on_end.take(),
        });

        if duration <= 0.0 {
            self.advance_transition(0.0);
            self.render(0.0);
            self.finish_transition();
        } else {
            self.play();
        }
        true
    }

    /// Steps the running transition; returns `true` once it reached its end.
    pub(crate) fn advance_transition(&mut self, dt: f64) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        let progress = transition.timeline.advance(dt);
        let value = if transition.timeline.is_finished() {
            transition.to
        } else {
            lerp(transition.from, transition.to, progress.eased)
        };
        self.track.set(value);
        if let Some(on_update) = transition.on_update.as_mut() {
            on_update(progress);
        }
        self.events.push(SnapEvent::TimelineUpdate(progress));
        transition.timeline.is_finished()
    }

    pub(crate) fn finish_transition(&mut self) {
        let Some(transition) = self.transition.take() else {
            return;
        };
        if let Some(on_end) = transition.on_end {
            on_end();
        }
        self.events.push(SnapEvent::TimelineEnd);
        tracing::debug!(coord = transition.to, "transition finished");
        self.release(Driver::Timeline);
        self.target_index = None;
        let geo = Geometry::new(&self.slides, self.layout);
        self.track.normalize_loop(&geo);
    }
}
