// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel orchestrator: reflow, frame loop, render and active slide.

use core::sync::atomic::{AtomicU64, Ordering};

use kurbo::Size;
use understory_swipe::Swipe;
use understory_timing::{Debounce, Frame, FrameClock, lerp};

use crate::driver::Driver;
use crate::event::SnapEvent;
use crate::geometry::{Geometry, Layout};
use crate::length::resolve_size;
use crate::magnet::{self, Magnet};
use crate::navigation::Transition;
use crate::props::{Direction, Freemode, SnapProps};
use crate::slide::{Slide, SlideId};
use crate::swipe::{InertiaRegime, swipe_props};
use crate::track::Track;
use crate::viewport::{UnitCache, Viewport};
use crate::wheel::Wheel;

/// Non-owning handle identifying a [`Snap`]. Attached slides store it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapId(u64);

impl SnapId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw identifier.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A headless carousel.
///
/// The host reports the container size, slide measurements and input, and
/// calls [`Snap::advance`] with a millisecond timestamp every animation frame
/// while [`Snap::wants_frame`] is `true`. Results are read from
/// [`Snap::slides`] and from the queue returned by [`Snap::drain_events`].
#[derive(Debug)]
pub struct Snap {
    pub(crate) id: SnapId,
    pub(crate) props: SnapProps,
    pub(crate) units: UnitCache,
    pub(crate) container: Size,
    pub(crate) layout: Layout,
    pub(crate) slides: Vec<Slide>,
    pub(crate) scrollable: Vec<usize>,
    pub(crate) track: Track,
    pub(crate) active_index: usize,
    pub(crate) target_index: Option<usize>,
    pub(crate) driver: Driver,
    pub(crate) transition: Option<Transition>,
    pub(crate) swipe: Swipe,
    pub(crate) swipe_origin: usize,
    pub(crate) inertia_regime: Option<InertiaRegime>,
    pub(crate) wheel: Wheel,
    pub(crate) resize_pending: Debounce,
    pub(crate) clock: FrameClock,
    pub(crate) playing: bool,
    pub(crate) now: u64,
    pub(crate) events: Vec<SnapEvent>,
    pub(crate) has_reflowed: bool,
}

impl Snap {
    /// Creates a snap owning `slides`.
    ///
    /// The container starts empty; report it with
    /// [`Snap::set_container_size`] or [`Snap::with_container_size`].
    #[must_use]
    pub fn new(props: SnapProps, viewport: Viewport, slides: Vec<Slide>) -> Self {
        let props = props.sanitized();
        let mut snap = Self {
            id: SnapId::next(),
            units: UnitCache::new(viewport),
            container: Size::ZERO,
            layout: Layout::default(),
            slides: Vec::new(),
            scrollable: Vec::new(),
            track: Track::default(),
            active_index: props.active_index,
            target_index: None,
            driver: Driver::None,
            transition: None,
            swipe: Swipe::new(swipe_props(&props)),
            swipe_origin: 0,
            inertia_regime: None,
            wheel: Wheel::new(),
            resize_pending: Debounce::new(props.resize_debounce),
            clock: FrameClock::new(),
            playing: false,
            now: 0,
            events: Vec::new(),
            has_reflowed: false,
            props,
        };
        snap.set_slides(slides);
        snap
    }

    /// Creates a snap with `count` regular slides sized by
    /// [`SnapProps::slide_size`].
    #[must_use]
    pub fn from_count(props: SnapProps, viewport: Viewport, count: usize) -> Self {
        let slides = (0..count)
            .map(|_| Slide::with_size(props.slide_size))
            .collect();
        Self::new(props, viewport, slides)
    }

    /// Sets the container size and reflows immediately.
    #[must_use]
    pub fn with_container_size(mut self, width: f64, height: f64) -> Self {
        self.container = Size::new(width, height);
        self.reflow();
        self
    }

    /// Handle of this snap.
    #[must_use]
    pub fn id(&self) -> SnapId {
        self.id
    }

    /// Current configuration.
    #[must_use]
    pub fn props(&self) -> &SnapProps {
        &self.props
    }

    /// Viewport used for unit conversion.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        self.units.viewport()
    }

    /// Reported container size.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.container
    }

    /// Container extent along the scroll axis, as of the last reflow.
    #[must_use]
    pub fn dom_size(&self) -> f64 {
        self.layout.dom_size
    }

    /// The slides, in layout order.
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Slide at `index`.
    #[must_use]
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Indices of slides larger than the container.
    #[must_use]
    pub fn scrollable_slides(&self) -> &[usize] {
        &self.scrollable
    }

    /// The track.
    #[must_use]
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Layout view for track and slide queries.
    #[must_use]
    pub fn geometry(&self) -> Geometry<'_> {
        Geometry::new(&self.slides, self.layout)
    }

    /// Index of the active slide.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Slide a programmatic navigation is heading to.
    #[must_use]
    pub fn target_index(&self) -> Option<usize> {
        self.target_index
    }

    /// Input currently writing the track.
    #[must_use]
    pub fn driver(&self) -> Driver {
        self.driver
    }

    /// Returns `true` while a scripted transition runs.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Returns `true` while a pointer swipe is held.
    #[must_use]
    pub fn is_swiping(&self) -> bool {
        self.swipe.is_swiping()
    }

    /// Returns `true` while swipe inertia runs.
    #[must_use]
    pub fn has_inertia(&self) -> bool {
        self.swipe.has_inertia()
    }

    /// Returns `true` when the host should keep calling [`Snap::advance`]
    /// every animation frame.
    #[must_use]
    pub fn wants_frame(&self) -> bool {
        self.playing
            || self.swipe.has_inertia()
            || self.resize_pending.is_pending()
            || self.wheel.end.is_pending()
    }

    /// Earliest pending deadline (reflow or wheel burst end), for hosts that
    /// pause their frame source while only timers are pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.resize_pending.deadline(), self.wheel.end.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Takes the queued events, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SnapEvent> {
        self.events.drain(..)
    }

    /// Replaces all slides, returning the previous ones detached.
    pub fn set_slides(&mut self, slides: Vec<Slide>) -> Vec<Slide> {
        let mut previous = core::mem::replace(&mut self.slides, slides);
        for slide in &mut previous {
            self.detach_slide(slide);
        }
        self.reindex();
        self.reflow();
        previous
    }

    /// Appends a slide.
    pub fn push_slide(&mut self, slide: Slide) -> SlideId {
        let id = slide.id();
        self.slides.push(slide);
        self.reindex();
        self.reflow();
        id
    }

    /// Removes the slide with `id`, returning it detached.
    pub fn remove_slide(&mut self, id: SlideId) -> Option<Slide> {
        let position = self.slides.iter().position(|s| s.id() == id)?;
        let mut slide = self.slides.remove(position);
        self.detach_slide(&mut slide);
        if self.active_index > position {
            self.active_index -= 1;
        }
        self.reindex();
        self.reflow();
        Some(slide)
    }

    /// Tears the snap down, returning its slides detached.
    #[must_use]
    pub fn into_slides(mut self) -> Vec<Slide> {
        let mut slides = core::mem::take(&mut self.slides);
        for slide in &mut slides {
            slide.detach();
        }
        slides
    }

    fn reindex(&mut self) {
        let id = self.id;
        for (index, slide) in self.slides.iter_mut().enumerate() {
            slide.attach(id, index);
        }
    }

    fn detach_slide(&mut self, slide: &mut Slide) {
        if slide.props().is_virtual && slide.is_visible() {
            self.events.push(SnapEvent::SlideUnmount(slide.id()));
        }
        slide.detach();
    }

    /// Reports the container size. The reflow runs after
    /// [`SnapProps::resize_debounce`] milliseconds, on a later
    /// [`Snap::advance`].
    pub fn set_container_size(&mut self, width: f64, height: f64) {
        let size = Size::new(width, height);
        if size == self.container {
            return;
        }
        self.container = size;
        self.resize(false);
    }

    /// Reports a new viewport. Viewport-relative lengths are re-resolved.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.units.set_viewport(viewport) {
            self.reflow();
        }
    }

    /// Requests a reflow: immediately when `is_manual`, debounced otherwise.
    pub fn resize(&mut self, is_manual: bool) {
        if is_manual {
            self.resize_pending.cancel();
            self.reflow();
        } else {
            self.resize_pending.schedule(self.now);
        }
    }

    /// Reports the measured extent of the slide at `index` along the scroll
    /// axis.
    pub fn resize_slide(&mut self, index: usize, measured: f64, is_manual: bool) {
        let Some(slide) = self.slides.get_mut(index) else {
            tracing::warn!(index, len = self.slides.len(), "resize_slide: index out of range");
            return;
        };
        if !measured.is_finite() || measured < 0.0 {
            tracing::warn!(index, measured, "resize_slide: ignoring invalid size");
            return;
        }
        slide.set_measured(measured);
        self.resize(is_manual);
    }

    /// Updates the configuration.
    ///
    /// Layout-affecting changes reflow; everything else re-bounds the track
    /// and wakes the frame loop.
    pub fn update_props(&mut self, update: impl FnOnce(&mut SnapProps)) {
        let previous = self.props.clone();
        let mut props = previous.clone();
        update(&mut props);
        self.props = props.sanitized();
        if self.props == previous {
            return;
        }

        self.swipe.update_props(swipe_props(&self.props));
        self.resize_pending.set_delay(self.props.resize_debounce);
        if !self.props.wheel {
            self.interrupt_wheel();
        }
        if !self.props.swipe {
            self.cancel_inertia();
            self.release(Driver::Swipe);
        }

        let relayout = previous.direction != self.props.direction
            || previous.gap != self.props.gap
            || previous.centered != self.props.centered
            || previous.looped != self.props.looped;
        if relayout {
            self.reflow();
        } else {
            let geo = Geometry::new(&self.slides, self.layout);
            self.track.clamp_target(&geo);
        }
        self.play();
    }

    fn reflow(&mut self) {
        let dom = match self.props.direction {
            Direction::Horizontal => self.container.width,
            Direction::Vertical => self.container.height,
        };
        let dom = if dom.is_finite() { dom.max(0.0) } else { 0.0 };
        let gap = self.props.gap.resolve(dom, &mut self.units);
        let gap = if gap.is_finite() { gap.max(0.0) } else { 0.0 };

        let mut coord = 0.0;
        self.scrollable.clear();
        for (index, slide) in self.slides.iter_mut().enumerate() {
            let size = resolve_size(&slide.props().size, dom, slide.measured(), &mut self.units);
            slide.set_size(size);
            slide.set_static_coord(coord);
            coord += size + gap;
            if size > dom {
                self.scrollable.push(index);
            }
        }
        self.layout = Layout {
            dom_size: dom,
            gap,
            centered: self.props.centered,
            looped: self.props.looped,
        };
        let last = self.slides.len().saturating_sub(1);
        self.active_index = self.active_index.min(last);

        let geo = Geometry::new(&self.slides, self.layout);
        tracing::debug!(
            slides = self.slides.len(),
            dom_size = dom,
            min = geo.min(),
            max = geo.max(),
            scrollable = self.scrollable.len(),
            "reflow"
        );
        self.events.push(SnapEvent::Reflow);

        let first = !self.has_reflowed && dom > 0.0;
        if first {
            self.has_reflowed = true;
            self.active_index = self.props.active_index.min(last);
        }
        let settle = first
            || (self.props.stick_on_resize
                && self.transition.is_none()
                && !self.swipe.is_swiping()
                && !self.swipe.has_inertia());
        let magnet = self
            .slides
            .get(self.active_index)
            .and_then(|slide| slide.magnets(&geo).first().copied());
        match magnet {
            Some(magnet) if settle => self.track.set(magnet),
            _ => self.track.clamp_target(&geo),
        }

        self.render(0.0);
        self.events.push(SnapEvent::Resize);
    }

    /// Advances the engine to `now` (milliseconds): fires due deadlines,
    /// steps inertia and runs one frame if the loop is playing.
    pub fn advance(&mut self, now: u64) {
        self.now = now;
        if self.resize_pending.fire(now) {
            self.reflow();
        }
        if self.wheel.end.fire(now) {
            self.on_wheel_end();
        }
        if self.swipe.has_inertia() {
            for event in self.swipe.advance(now) {
                self.handle_swipe_event(event);
            }
        }
        if self.playing {
            let frame = self.clock.tick(now);
            self.on_frame(frame.duration);
        }
    }

    fn on_frame(&mut self, frame_duration: f64) {
        let before = self.track;
        let finished = if self.transition.is_some() {
            self.advance_transition(frame_duration)
        } else {
            let ease = if self.swipe.is_swiping() || self.swipe.has_inertia() {
                self.props.swipe_lerp
            } else {
                self.props.lerp
            };
            let factor = Frame::new(frame_duration).lerp_factor(ease);
            let geo = Geometry::new(&self.slides, self.layout);
            self.track.lerp(factor, self.props.edge_friction, &geo);
            self.track.normalize_loop(&geo);
            false
        };

        self.render(frame_duration);
        if finished {
            self.finish_transition();
        }

        let idle = self.transition.is_none()
            && !self.swipe.has_inertia()
            && (self.track.is_interpolated() || self.track == before);
        if idle {
            self.pause();
        }
    }

    pub(crate) fn play(&mut self) {
        if !self.playing {
            tracing::trace!("frame loop resumed");
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        tracing::trace!("frame loop paused");
        self.playing = false;
        self.clock.reset();
    }

    /// Pushes the track position into every slide, resolves the active
    /// slide and applies friction.
    pub fn render(&mut self, frame_duration: f64) {
        let current = self.track.current();
        for index in 0..self.slides.len() {
            let geo = Geometry::new(&self.slides, self.layout);
            let (coord, progress, visible) = self.slides[index].layout_at(current, &geo);
            let slide = &mut self.slides[index];
            if slide.set_layout(coord, progress, visible) && slide.props().is_virtual {
                self.events.push(if visible {
                    SnapEvent::SlideMount(slide.id())
                } else {
                    SnapEvent::SlideUnmount(slide.id())
                });
            }
        }

        self.update_active_index();
        self.apply_friction(frame_duration);
        self.events.push(SnapEvent::Update);
    }

    fn preferred(&self) -> [Option<usize>; 2] {
        [self.target_index, Some(self.active_index)]
    }

    /// The nearest magnet only becomes active once it also owns the magnet
    /// nearest to where the track is heading, so fast transitions do not
    /// flicker through every slide they pass.
    fn update_active_index(&mut self) {
        let geo = self.geometry();
        let prefer = self.preferred();
        let Some(nearest) = magnet::nearest(&geo, self.track.looped_current(&geo), &prefer) else {
            return;
        };
        let accept = match self.target_index {
            Some(target) => nearest.index == target,
            None => magnet::nearest(&geo, self.track.looped_target(&geo), &prefer)
                .is_some_and(|m| m.index == nearest.index),
        };
        if accept && nearest.index != self.active_index {
            let previous = self.active_index;
            self.active_index = nearest.index;
            tracing::debug!(index = nearest.index, previous, "active slide changed");
            self.events.push(SnapEvent::ActiveSlide {
                index: nearest.index,
                previous,
            });
        }
    }

    fn apply_friction(&mut self, frame_duration: f64) {
        let friction = self.props.friction;
        if friction <= 0.0 || frame_duration <= 0.0 || self.props.freemode == Freemode::Plain {
            return;
        }
        if self.driver == Driver::Timeline || self.transition.is_some() || self.swipe.has_inertia() {
            return;
        }
        if self.swipe.is_swiping() && !self.props.swipe_friction {
            return;
        }
        let geo = Geometry::new(&self.slides, self.layout);
        if self.track.is_slide_scrolling(&geo) {
            return;
        }
        let prefer = self.preferred();
        let Some(magnet) = magnet::nearest(&geo, self.track.looped_current(&geo), &prefer) else {
            return;
        };
        let goal = self.track.current() + magnet.diff;
        let factor = Frame::new(frame_duration).lerp_factor(friction);
        let target = lerp(self.track.target(), goal, factor);
        self.track.set_target(target);
    }

    /// Magnet nearest to the track's current position.
    #[must_use]
    pub fn nearest_magnet(&self) -> Option<Magnet> {
        let geo = self.geometry();
        magnet::nearest(&geo, self.track.looped_current(&geo), &self.preferred())
    }

    /// Magnet nearest to `coord`.
    #[must_use]
    pub fn nearest_magnet_to(&self, coord: f64) -> Option<Magnet> {
        let geo = self.geometry();
        magnet::nearest(&geo, geo.loop_coord(coord), &self.preferred())
    }
}

#[cfg(test)]
mod tests {
    use super::Snap;
    use crate::{Length, Slide, SlideSize, SnapEvent, SnapProps, Viewport};

    fn five(props: SnapProps) -> Snap {
        let props = SnapProps {
            slide_size: SlideSize::Fixed(100.0),
            ..props
        };
        Snap::from_count(props, Viewport::default(), 5).with_container_size(300.0, 100.0)
    }

    #[test]
    fn reflow_prefix_sums_with_gap() {
        let snap = five(SnapProps {
            gap: Length::px(10.0),
            ..SnapProps::default()
        });
        let coords: Vec<f64> = snap.slides().iter().map(Slide::static_coord).collect();
        assert_eq!(coords, [0.0, 110.0, 220.0, 330.0, 440.0]);
        assert_eq!(snap.geometry().max(), 240.0);
    }

    #[test]
    fn initial_active_index_positions_the_track() {
        let snap = five(SnapProps {
            active_index: 2,
            ..SnapProps::default()
        });
        assert_eq!(snap.active_index(), 2);
        assert_eq!(snap.track().current(), 200.0);
    }

    #[test]
    fn container_resize_is_debounced() {
        let mut snap = five(SnapProps::default());
        snap.drain_events().for_each(drop);
        snap.set_container_size(200.0, 100.0);
        assert_eq!(snap.dom_size(), 300.0);
        assert!(snap.wants_frame());
        snap.advance(0);
        assert_eq!(snap.dom_size(), 200.0);
        let events: Vec<_> = snap.drain_events().collect();
        assert_eq!(events.first(), Some(&SnapEvent::Reflow));
        assert!(events.contains(&SnapEvent::Resize));
    }

    #[test]
    fn auto_slides_use_measurements() {
        let mut snap = Snap::from_count(SnapProps::default(), Viewport::default(), 3)
            .with_container_size(300.0, 100.0);
        assert!(snap.slides().iter().all(Slide::is_observed));
        snap.resize_slide(1, 120.0, true);
        assert_eq!(snap.slide(1).map(Slide::size), Some(120.0));
        assert_eq!(snap.slide(2).map(Slide::static_coord), Some(120.0));
        // Out-of-range reports are ignored.
        snap.resize_slide(9, 10.0, true);
    }

    #[test]
    fn oversized_slides_are_scrollable() {
        let slides = vec![Slide::fixed(100.0), Slide::fixed(500.0), Slide::fixed(100.0)];
        let snap = Snap::new(SnapProps::default(), Viewport::default(), slides)
            .with_container_size(300.0, 100.0);
        assert_eq!(snap.scrollable_slides(), &[1]);
    }

    #[test]
    fn removing_slides_detaches_them() {
        let mut snap = five(SnapProps::default());
        let id = snap.slides()[1].id();
        let removed = snap.remove_slide(id).map(|s| s.owner());
        assert_eq!(removed, Some(None));
        assert_eq!(snap.slides().len(), 4);
        assert!(snap.slides().iter().enumerate().all(|(i, s)| s.index() == i));
        let slides = snap.into_slides();
        assert!(slides.iter().all(|s| s.owner().is_none()));
    }

    #[test]
    fn render_lays_out_every_slide() {
        let mut snap = five(SnapProps::default());
        snap.track.set(150.0);
        snap.render(0.0);
        let coords: Vec<f64> = snap.slides().iter().map(Slide::coord).collect();
        assert_eq!(coords, [-150.0, -50.0, 50.0, 150.0, 250.0]);
        let visible: Vec<bool> = snap.slides().iter().map(Slide::is_visible).collect();
        assert_eq!(visible, [false, true, true, true, true]);
        assert_eq!(snap.slides()[1].progress(), 0.5);
    }

    #[test]
    fn frame_loop_pauses_when_settled() {
        let mut snap = five(SnapProps::default());
        assert!(!snap.wants_frame());
        snap.update_props(|p| p.lerp = 0.5);
        let mut now = 0;
        while snap.wants_frame() && now < 10_000 {
            now += 16;
            snap.advance(now);
        }
        assert!(!snap.wants_frame());
    }
}
