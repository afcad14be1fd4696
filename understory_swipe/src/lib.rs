// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_swipe --heading-base-level=0

//! Understory Swipe: headless swipe gesture tracking.
//!
//! [`Swipe`] is a small state machine that turns raw pointer positions into
//! swipe transitions. It owns just enough state to answer:
//!
//! - Has the pointer moved far enough to count as a swipe (start threshold)?
//! - Is the movement along the locked axis, or should the host keep it?
//! - How far did the pointer move since the last event (`step`) and since it
//!   went down (`diff`)?
//! - How fast was it moving when released (`velocity`, px/s)?
//! - Where does the motion continue after release (inertia)?
//!
//! Inertia is opt-in per release: after [`SwipeEvent::End`], the host passes a
//! velocity to [`Swipe::start_inertia`]. This is the velocity-modifier seam:
//! hosts can project the release velocity onto snap points (or clamp it)
//! before the motion starts. Inertia then advances via [`Swipe::advance`] and
//! reports [`SwipeEvent::Move`]s exactly like pointer movement.
//!
//! The crate does not know about DOM events or any UI framework; timestamps
//! are host-provided milliseconds.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_swipe::{Swipe, SwipeEvent};
//!
//! let mut swipe = Swipe::default();
//! swipe.pointer_down(Point::new(0.0, 0.0), 0);
//!
//! let events = swipe.pointer_move(Point::new(40.0, 0.0), 16);
//! assert!(matches!(events[0], SwipeEvent::Start(_)));
//!
//! if let Some(SwipeEvent::End(coords)) = swipe.pointer_up(32) {
//!     // Keep only the horizontal part of the release velocity.
//!     let velocity = Vec2::new(coords.velocity.x, 0.0);
//!     let _ = swipe.start_inertia(velocity, 32);
//! }
//! for event in swipe.advance(48) {
//!     if let SwipeEvent::Move(coords) = event {
//!         let _ = coords.step;
//!     }
//! }
//! ```

mod swipe;
mod velocity;

pub use swipe::{Axis, Swipe, SwipeCoords, SwipeEvent, SwipeProps};
