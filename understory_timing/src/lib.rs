// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timing primitives for UI runtimes.
//!
//! This crate does not own a clock, a timer thread, or an animation-frame
//! source. Hosts feed timestamps (milliseconds) in and poll the primitives
//! for what they should do next:
//!
//! - [`Ease`]: easing curves, including CSS-style cubic beziers.
//! - [`Timeline`]: a scripted tween advanced by frame durations.
//! - [`Frame`] / [`FrameClock`]: frame-duration compensated interpolation
//!   factors, so an ease constant tuned at 60fps behaves the same at 120fps.
//! - [`lerp`]: interpolation that converges to exact equality.
//! - [`Debounce`]: a re-armable deadline for "quiet period" detection.
//! - [`TransitionDuration`]: fixed or distance-derived durations.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::{Ease, Frame, Timeline, lerp};
//!
//! // Smooth-follow a target with a per-60fps ease of 0.2.
//! let frame = Frame::new(8.0);
//! let mut value = 0.0;
//! value = lerp(value, 100.0, frame.lerp_factor(0.2));
//! assert!(value > 0.0 && value < 100.0);
//!
//! // Or run a scripted 300ms tween.
//! let mut tl = Timeline::new(300.0, Ease::OutCubic);
//! let p = tl.advance(150.0);
//! assert!(p.eased > p.progress);
//! ```
//!
//! With the `serde` feature, configuration types ([`Ease`],
//! [`TransitionDuration`]) implement `Serialize` and `Deserialize`.

mod debounce;
mod duration;
mod ease;
mod frame;
mod timeline;

pub use debounce::Debounce;
pub use duration::TransitionDuration;
pub use ease::Ease;
pub use frame::{FRAME_60FPS, Frame, FrameClock, LERP_APPROXIMATION, MAX_FRAME_DURATION, lerp};
pub use timeline::{Timeline, TimelineProgress};
