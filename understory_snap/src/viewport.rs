// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport / device description and viewport-relative unit conversion.

use hashbrown::HashMap;

use crate::length::LengthUnit;

/// Host operating system, as far as input heuristics care.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Os {
    /// macOS.
    MacOs,
    /// iOS / iPadOS.
    Ios,
    /// Windows.
    Windows,
    /// Linux desktops.
    Linux,
    /// Android.
    Android,
    /// Anything else.
    #[default]
    Other,
}

impl Os {
    /// Largest wheel-delta variation still considered "stable" input.
    ///
    /// Apple platforms report touchpad and Magic Mouse deltas with sub-pixel
    /// jitter even for steady motion, so they get a looser tolerance.
    #[must_use]
    pub fn touchpad_precision(self) -> f64 {
        match self {
            Self::MacOs | Self::Ios => 1.0,
            _ => 0.0,
        }
    }
}

/// The viewport the engine lives in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Viewport width in CSS pixels.
    pub width: f64,
    /// Viewport height in CSS pixels.
    pub height: f64,
    /// Whether the device is classified as mobile.
    pub is_mobile: bool,
    /// Host operating system.
    pub os: Os,
    /// Root font size in pixels, used for `rem`.
    pub root_font_size: f64,
}

impl Viewport {
    /// A desktop viewport of the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            is_mobile: false,
            os: Os::Other,
            root_font_size: 16.0,
        }
    }

    /// Returns a copy marked as mobile (or not).
    #[must_use]
    pub fn with_mobile(mut self, is_mobile: bool) -> Self {
        self.is_mobile = is_mobile;
        self
    }

    /// Returns a copy with the given operating system.
    #[must_use]
    pub fn with_os(mut self, os: Os) -> Self {
        self.os = os;
        self
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Cache of viewport-relative unit conversions.
///
/// Entries are keyed by unit and value and are dropped whenever the
/// viewport changes.
#[derive(Clone, Debug, Default)]
pub struct UnitCache {
    viewport: Viewport,
    entries: HashMap<(LengthUnit, u64), f64>,
}

impl UnitCache {
    /// Creates an empty cache for `viewport`.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            entries: HashMap::new(),
        }
    }

    /// The viewport conversions are computed against.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Replaces the viewport. Returns `true` (and invalidates the cache) when
    /// it differs from the previous one.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        if self.viewport == viewport {
            return false;
        }
        self.viewport = viewport;
        self.entries.clear();
        true
    }

    /// Number of cached conversions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts a viewport-relative `value` to pixels.
    ///
    /// Container-relative units (`%`) are not viewport-relative and are better
    /// resolved directly; for them (and `px`) this is the identity.
    pub fn px_for(&mut self, unit: LengthUnit, value: f64) -> f64 {
        let per_unit = match unit {
            LengthUnit::Px | LengthUnit::Percent => return value,
            LengthUnit::Vw => self.viewport.width / 100.0,
            LengthUnit::Vh => self.viewport.height / 100.0,
            LengthUnit::Rem => self.viewport.root_font_size,
        };
        *self
            .entries
            .entry((unit, value.to_bits()))
            .or_insert(value * per_unit)
    }
}
