// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Results closer than this to the interpolation target snap onto it.
pub const LERP_APPROXIMATION: f64 = 0.001;

/// Duration of one frame at 60fps, in milliseconds.
pub const FRAME_60FPS: f64 = 1000.0 / 60.0;

/// Longest frame duration a [`FrameClock`] reports, in milliseconds.
///
/// Hosts that were suspended (for example a backgrounded tab) resume with a
/// single long frame; clamping keeps animations from jumping to their end.
pub const MAX_FRAME_DURATION: f64 = 100.0;

/// Linear interpolation from `from` toward `to`.
///
/// When the result lands within [`LERP_APPROXIMATION`] of `to`, `to` is
/// returned exactly so repeated interpolation converges to equality.
#[must_use]
pub fn lerp(from: f64, to: f64, factor: f64) -> f64 {
    let value = from + (to - from) * factor;
    if (value - to).abs() < LERP_APPROXIMATION {
        to
    } else {
        value
    }
}

/// One animation frame as seen by frame consumers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Time since the previous frame, in milliseconds.
    pub duration: f64,
}

impl Frame {
    /// A frame lasting `duration` milliseconds.
    #[must_use]
    pub fn new(duration: f64) -> Self {
        Self { duration }
    }

    /// Converts a per-60fps ease constant into an interpolation factor for
    /// this frame: `1 - e^(-ease * 60 * duration / 1000)`.
    ///
    /// The factor for `ease = 1` is always `1`, so hosts can use it to mean
    /// "jump immediately".
    #[must_use]
    pub fn lerp_factor(&self, ease: f64) -> f64 {
        if ease >= 1.0 {
            return 1.0;
        }
        if ease <= 0.0 || self.duration <= 0.0 {
            return 0.0;
        }
        let factor = 1.0 - (-ease * 60.0 * (self.duration / 1000.0)).exp();
        factor.clamp(0.0, 1.0)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(FRAME_60FPS)
    }
}

/// Derives [`Frame`]s from host timestamps.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last: Option<u64>,
}

impl FrameClock {
    /// Creates a clock that has not seen any frame yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produces the frame ending at `now` (milliseconds).
    ///
    /// The first tick after creation or [`FrameClock::reset`] reports one
    /// 60fps frame.
    pub fn tick(&mut self, now: u64) -> Frame {
        let duration = match self.last {
            Some(last) => {
                let raw = now.saturating_sub(last) as f64;
                raw.min(MAX_FRAME_DURATION)
            }
            None => FRAME_60FPS,
        };
        self.last = Some(now);
        Frame::new(duration)
    }

    /// Forgets the last timestamp, e.g. when the frame loop pauses.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
