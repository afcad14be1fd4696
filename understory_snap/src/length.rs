// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lengths with units and slide size specifications.

use core::str::FromStr;

use crate::error::{SnapError, SnapResult};
use crate::viewport::UnitCache;

/// Unit of a [`Length`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LengthUnit {
    /// CSS pixels.
    #[default]
    Px,
    /// Percent of the container extent along the scroll axis.
    Percent,
    /// Percent of the viewport width.
    Vw,
    /// Percent of the viewport height.
    Vh,
    /// Multiples of the root font size.
    Rem,
}

/// A length with a unit, resolved to pixels against the container and the
/// viewport.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Length {
    /// Numeric value.
    pub value: f64,
    /// Unit of `value`.
    pub unit: LengthUnit,
}

impl Length {
    /// A length in pixels.
    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }

    /// A percentage of the container extent.
    #[must_use]
    pub const fn percent(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Percent,
        }
    }

    /// A percentage of the viewport width.
    #[must_use]
    pub const fn vw(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Vw,
        }
    }

    /// A percentage of the viewport height.
    #[must_use]
    pub const fn vh(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Vh,
        }
    }

    /// Multiples of the root font size.
    #[must_use]
    pub const fn rem(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Rem,
        }
    }

    /// Resolves to pixels. `container` is the container extent along the
    /// scroll axis.
    pub fn resolve(&self, container: f64, units: &mut UnitCache) -> f64 {
        match self.unit {
            LengthUnit::Px => self.value,
            LengthUnit::Percent => container * self.value / 100.0,
            unit => units.px_for(unit, self.value),
        }
    }
}

impl FromStr for Length {
    type Err = SnapError;

    fn from_str(s: &str) -> SnapResult<Self> {
        let trimmed = s.trim();
        // The unit is the trailing run of letters, so exponents stay numeric.
        let split = trimmed
            .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
            .len();
        let (number, suffix) = trimmed.split_at(split);
        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| SnapError::invalid_length(s))?;
        if !value.is_finite() {
            return Err(SnapError::invalid_length(s));
        }
        let unit = match suffix.trim() {
            "" | "px" => LengthUnit::Px,
            "%" => LengthUnit::Percent,
            "vw" => LengthUnit::Vw,
            "vh" => LengthUnit::Vh,
            "rem" => LengthUnit::Rem,
            _ => return Err(SnapError::invalid_length(s)),
        };
        Ok(Self { value, unit })
    }
}

impl From<f64> for Length {
    fn from(value: f64) -> Self {
        Self::px(value)
    }
}

/// How a slide's extent along the scroll axis is determined.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlideSize {
    /// Use the host-measured size of the slide's element.
    #[default]
    Auto,
    /// Match the container extent.
    Stretch,
    /// A fixed size in pixels.
    Fixed(f64),
    /// A size with a unit.
    Length(Length),
}

impl SlideSize {
    /// Returns `true` for [`SlideSize::Auto`].
    #[must_use]
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl FromStr for SlideSize {
    type Err = SnapError;

    fn from_str(s: &str) -> SnapResult<Self> {
        match s.trim() {
            "auto" => Ok(Self::Auto),
            "stretch" => Ok(Self::Stretch),
            other => {
                let length: Length = other.parse()?;
                Ok(match length.unit {
                    LengthUnit::Px => Self::Fixed(length.value),
                    _ => Self::Length(length),
                })
            }
        }
    }
}

/// Resolves a slide size to pixels.
///
/// `dom_size` is the container extent along the scroll axis and `measured`
/// the host-measured element extent, if the host reported one. Negative and
/// non-finite results resolve to zero.
pub fn resolve_size(
    size: &SlideSize,
    dom_size: f64,
    measured: Option<f64>,
    units: &mut UnitCache,
) -> f64 {
    let px = match size {
        SlideSize::Auto => measured.unwrap_or(0.0),
        SlideSize::Stretch => dom_size,
        SlideSize::Fixed(px) => *px,
        SlideSize::Length(length) => length.resolve(dom_size, units),
    };
    if px.is_finite() && px > 0.0 { px } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::{Length, LengthUnit, SlideSize, resolve_size};
    use crate::error::SnapError;
    use crate::viewport::{UnitCache, Viewport};

    #[test]
    fn parses_lengths() {
        assert_eq!("120".parse::<Length>(), Ok(Length::px(120.0)));
        assert_eq!(" 12.5px ".parse::<Length>(), Ok(Length::px(12.5)));
        assert_eq!("50%".parse::<Length>(), Ok(Length::percent(50.0)));
        assert_eq!("30vw".parse::<Length>(), Ok(Length::vw(30.0)));
        assert_eq!("-2rem".parse::<Length>().map(|l| l.unit), Ok(LengthUnit::Rem));
        assert_eq!(
            "12qq".parse::<Length>(),
            Err(SnapError::InvalidLength("12qq".into()))
        );
        assert!("px".parse::<Length>().is_err());
    }

    #[test]
    fn exponents_stay_in_the_number() {
        assert_eq!("1e3px".parse::<Length>(), Ok(Length::px(1_000.0)));
        assert_eq!("2.5E1%".parse::<Length>(), Ok(Length::percent(25.0)));
        assert_eq!("1e3".parse::<Length>(), Ok(Length::px(1_000.0)));
        assert!("5e".parse::<Length>().is_err());
    }

    #[test]
    fn parses_slide_sizes() {
        assert_eq!("auto".parse::<SlideSize>(), Ok(SlideSize::Auto));
        assert_eq!("stretch".parse::<SlideSize>(), Ok(SlideSize::Stretch));
        assert_eq!("100px".parse::<SlideSize>(), Ok(SlideSize::Fixed(100.0)));
        assert_eq!(
            "25vh".parse::<SlideSize>(),
            Ok(SlideSize::Length(Length::vh(25.0)))
        );
    }

    #[test]
    fn resolves_every_variant() {
        let mut units = UnitCache::new(Viewport::new(1000.0, 800.0));
        assert_eq!(resolve_size(&SlideSize::Auto, 300.0, Some(42.0), &mut units), 42.0);
        assert_eq!(resolve_size(&SlideSize::Auto, 300.0, None, &mut units), 0.0);
        assert_eq!(resolve_size(&SlideSize::Stretch, 300.0, None, &mut units), 300.0);
        assert_eq!(resolve_size(&SlideSize::Fixed(90.0), 300.0, None, &mut units), 90.0);
        assert_eq!(
            resolve_size(&SlideSize::Length(Length::percent(50.0)), 300.0, None, &mut units),
            150.0
        );
        assert_eq!(
            resolve_size(&SlideSize::Length(Length::vw(10.0)), 300.0, None, &mut units),
            100.0
        );
        assert_eq!(resolve_size(&SlideSize::Fixed(-5.0), 300.0, None, &mut units), 0.0);
    }
}
