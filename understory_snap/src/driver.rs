// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbitration between the inputs that write the track.

use crate::snap::Snap;

/// The input currently writing [`Track`](crate::Track) positions.
///
/// Friction inside the render pass is not a driver: it only runs while no
/// scripted transition or inertia does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Driver {
    /// Nobody; the track settles on its own.
    #[default]
    None,
    /// A wheel burst.
    Wheel,
    /// A pointer swipe, including its inertia.
    Swipe,
    /// A scripted transition.
    Timeline,
}

impl Snap {
    /// Hands the track to `driver`, cancelling whatever the previous one was
    /// doing.
    ///
    /// - wheel: cancels the transition and inertia
    /// - swipe: additionally ends a wheel burst without sticking
    /// - timeline: cancels inertia; a wheel burst stepping slides keeps running
    pub(crate) fn claim(&mut self, driver: Driver) {
        match driver {
            Driver::None => {}
            Driver::Wheel => {
                self.cancel_transition();
                self.cancel_inertia();
            }
            Driver::Swipe => {
                self.cancel_transition();
                self.cancel_inertia();
                self.interrupt_wheel();
            }
            Driver::Timeline => self.cancel_inertia(),
        }
        if self.driver != driver {
            tracing::debug!(from = ?self.driver, to = ?driver, "driver hand-off");
            self.driver = driver;
        }
    }

    /// Gives the track back, but only if `driver` still holds it.
    pub(crate) fn release(&mut self, driver: Driver) {
        if self.driver == driver && driver != Driver::None {
            tracing::debug!(?driver, "driver released");
            self.driver = Driver::None;
        }
    }

    pub(crate) fn cancel_inertia(&mut self) {
        if self.swipe.cancel_inertia().is_some() {
            self.inertia_regime = None;
            self.release(Driver::Swipe);
        }
    }
}
