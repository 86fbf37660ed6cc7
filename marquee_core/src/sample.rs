// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element geometry as consumed by the timeline builder.
//!
//! Layout is somebody else's job. A [`GeometrySampler`] measures the elements
//! of a track and reports one [`ElementSample`] per element, in visual order.
//! Samples are plain values: a layout change means sampling again and
//! rebuilding, never patching an existing timeline.

use alloc::vec::Vec;

use kurbo::Rect;

/// One measured element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementSample {
    /// Position in the visual sequence (zero-based).
    pub index: usize,
    /// Layout width in pixels, before scaling.
    pub width: f64,
    /// Horizontal layout position, in the same space as every other sample.
    pub offset: f64,
    /// Horizontal scale factor applied to the element.
    pub scale_x: f64,
    /// Translation already applied to the element, in pixels.
    ///
    /// This is part of the element's resting position: the loop animates
    /// away from and back to it.
    pub shift: f64,
}

impl ElementSample {
    /// Creates an unscaled, unshifted sample.
    #[must_use]
    pub const fn new(index: usize, offset: f64, width: f64) -> Self {
        Self {
            index,
            width,
            offset,
            scale_x: 1.0,
            shift: 0.0,
        }
    }

    /// Creates a sample from a layout box.
    ///
    /// `bounds` is the element's unscaled layout box; only its horizontal
    /// extent is used.
    #[must_use]
    pub fn from_rect(index: usize, bounds: Rect, scale_x: f64) -> Self {
        Self {
            index,
            width: bounds.width(),
            offset: bounds.x0,
            scale_x,
            shift: 0.0,
        }
    }

    /// Returns a copy with the given scale factor.
    #[must_use]
    pub const fn with_scale_x(mut self, scale_x: f64) -> Self {
        self.scale_x = scale_x;
        self
    }

    /// Returns a copy with the given pre-existing translation.
    #[must_use]
    pub const fn with_shift(mut self, shift: f64) -> Self {
        self.shift = shift;
        self
    }

    /// Width after scaling: the distance the element covers on screen.
    #[inline]
    #[must_use]
    pub fn effective_width(&self) -> f64 {
        self.width * self.scale_x
    }
}

/// Measures the elements of a track.
///
/// Implementations must be pure reads: sampling twice without a layout
/// change in between returns the same samples.
pub trait GeometrySampler {
    /// Returns one sample per element, in visual order, with `index` equal
    /// to the position in the returned vector.
    fn sample(&self) -> Vec<ElementSample>;
}

impl GeometrySampler for [ElementSample] {
    fn sample(&self) -> Vec<ElementSample> {
        self.iter()
            .enumerate()
            .map(|(index, s)| ElementSample { index, ..*s })
            .collect()
    }
}

/// Lays out `widths` edge to edge starting at zero.
///
/// Handy for tracks whose elements sit in a single flex row with no gaps,
/// and for tests.
#[must_use]
pub fn packed_row(widths: &[f64]) -> Vec<ElementSample> {
    let mut offset = 0.0;
    widths
        .iter()
        .enumerate()
        .map(|(index, &width)| {
            let sample = ElementSample::new(index, offset, width);
            offset += width;
            sample
        })
        .collect()
}
