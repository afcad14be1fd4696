// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Duration of a transition in milliseconds, optionally derived from the
/// distance it covers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionDuration {
    /// Always take the given number of milliseconds.
    Fixed(f64),
    /// `clamp(|distance| * scale, min, max)` milliseconds.
    ByDistance {
        /// Milliseconds per unit of distance.
        scale: f64,
        /// Lower bound in milliseconds.
        min: f64,
        /// Upper bound in milliseconds.
        max: f64,
    },
}

impl Default for TransitionDuration {
    fn default() -> Self {
        Self::Fixed(500.0)
    }
}

impl From<f64> for TransitionDuration {
    fn from(ms: f64) -> Self {
        Self::Fixed(ms)
    }
}

impl TransitionDuration {
    /// Resolves the duration for a transition spanning `distance` units.
    ///
    /// The result is never negative; non-finite inputs resolve to zero.
    #[must_use]
    pub fn resolve(self, distance: f64) -> f64 {
        let value = match self {
            Self::Fixed(ms) => ms,
            Self::ByDistance { scale, min, max } => {
                let (min, max) = if min <= max { (min, max) } else { (max, min) };
                (distance.abs() * scale).clamp(min, max)
            }
        };
        if value.is_finite() { value.max(0.0) } else { 0.0 }
    }
}
