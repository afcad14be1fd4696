// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-magnet resolution.

use crate::geometry::Geometry;

/// Magnets closer than this are considered equally near.
const TIE_EPSILON: f64 = 1e-6;

/// A resolved snap point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Magnet {
    /// Index of the slide owning the magnet.
    pub index: usize,
    /// Magnet coordinate (looped when the track loops).
    pub coord: f64,
    /// `coord - from`: the offset to add to the track to land on it.
    pub diff: f64,
    /// `|diff|`.
    pub distance: f64,
}

/// Finds the magnet nearest to `from` across all slides.
///
/// Among equally near magnets, slides listed earlier in `prefer` win, then
/// lower indices.
pub(crate) fn nearest(geo: &Geometry<'_>, from: f64, prefer: &[Option<usize>]) -> Option<Magnet> {
    let rank = |index: usize| {
        prefer
            .iter()
            .position(|p| *p == Some(index))
            .unwrap_or(usize::MAX)
    };
    let mut best: Option<Magnet> = None;
    for slide in geo.slides() {
        for coord in slide.magnets(geo) {
            let diff = coord - from;
            let candidate = Magnet {
                index: slide.index(),
                coord,
                diff,
                distance: diff.abs(),
            };
            let better = match &best {
                None => true,
                Some(best) => {
                    candidate.distance < best.distance - TIE_EPSILON
                        || (candidate.distance <= best.distance + TIE_EPSILON
                            && rank(candidate.index) < rank(best.index))
                }
            };
            if better {
                best = Some(candidate);
            }
        }
    }
    best
}
