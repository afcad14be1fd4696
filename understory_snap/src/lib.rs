// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_snap --heading-base-level=0

//! Understory Snap: a headless carousel engine.
//!
//! A [`Snap`] owns a list of [`Slide`]s and a single scroll position, the
//! [`Track`]. Input (wheel, pointer swipes, programmatic navigation, native
//! focus scrolling) moves the track's target; a host-driven frame loop
//! interpolates the track toward it and renders every slide's live
//! coordinate, progress and visibility. At rest the track settles on the
//! nearest *magnet*, a snap point defined by the slides.
//!
//! The engine never touches a DOM or a clock:
//!
//! - sizes come in through [`Snap::set_container_size`] and
//!   [`Snap::resize_slide`],
//! - input through [`Snap::on_wheel`], [`Snap::on_pointer_down`] and friends,
//! - time through [`Snap::advance`], which the host calls every animation
//!   frame while [`Snap::wants_frame`] is `true`,
//! - and results go out through [`Snap::slides`] and the queue of
//!   [`SnapEvent`]s returned by [`Snap::drain_events`].
//!
//! Exactly one input writes the track at a time. Each input claims the
//! [`Driver`] tag before writing, which cancels the previous one: a new swipe
//! cancels a running transition, a transition cancels swipe inertia, and so
//! on.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_snap::{SlideSize, Snap, SnapEvent, SnapProps, TransitionOptions, Viewport};
//!
//! let props = SnapProps {
//!     slide_size: SlideSize::Fixed(100.0),
//!     ..SnapProps::default()
//! };
//! let mut snap = Snap::from_count(props, Viewport::default(), 5).with_container_size(300.0, 100.0);
//!
//! snap.to_slide(2, TransitionOptions::default());
//! let mut now = 0;
//! while snap.wants_frame() {
//!     now += 16;
//!     snap.advance(now);
//! }
//! assert_eq!(snap.active_index(), 2);
//! assert_eq!(snap.track().current(), 200.0);
//! assert!(snap.drain_events().any(|e| e == SnapEvent::TimelineEnd));
//! ```
//!
//! Lengths can be parsed from CSS-like strings:
//!
//! ```rust
//! use understory_snap::{Length, SlideSize};
//!
//! assert_eq!("50%".parse::<SlideSize>(), Ok(SlideSize::Length(Length::percent(50.0))));
//! assert_eq!("120px".parse::<SlideSize>(), Ok(SlideSize::Fixed(120.0)));
//! ```
//!
//! With the `serde` feature, configuration types ([`SnapProps`],
//! [`SlideProps`], [`Length`], [`SlideSize`], [`Viewport`], ...) implement
//! `Serialize` and `Deserialize`.

mod driver;
mod error;
mod event;
mod geometry;
mod keyboard;
mod length;
mod magnet;
mod navigation;
mod props;
mod slide;
mod snap;
mod swipe;
mod track;
mod viewport;
mod wheel;

pub use driver::Driver;
pub use error::{SnapError, SnapResult};
pub use event::SnapEvent;
pub use geometry::{Geometry, Layout};
pub use length::{Length, LengthUnit, SlideSize, resolve_size};
pub use magnet::Magnet;
pub use navigation::TransitionOptions;
pub use props::{Direction, Freemode, InputAxis, NavDirection, SnapProps, WheelThrottle};
pub use slide::{Magnets, Slide, SlideId, SlideProps};
pub use snap::{Snap, SnapId};
pub use track::{FAST_LERP_THRESHOLD, Track};
pub use viewport::{Os, UnitCache, Viewport};
pub use wheel::{
    AUTO_THROTTLE_MS, DECAY_RATIO, DeltaMode, GAIN_RATIO, TOUCHPAD_SMALL_DELTA, WHEEL_BURST_END_MS,
    WHEEL_START_DELTA, WheelInput,
};

pub use understory_swipe::{Axis, SwipeCoords};
pub use understory_timing::{Ease, TimelineProgress, TransitionDuration};
