// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element measurement from DOM layout.

use alloc::vec::Vec;

use kurbo::Rect;
use marquee_core::sample::{ElementSample, GeometrySampler};
use web_sys::HtmlElement;

/// Samples a list of DOM elements in visual order.
///
/// Offsets come from `offsetLeft`, which ignores CSS transforms, so sampling
/// while the loop is playing still reports resting positions. The horizontal
/// scale is the ratio of the rendered width (`getBoundingClientRect`) to the
/// layout width (`offsetWidth`).
pub struct DomSampler {
    elements: Vec<HtmlElement>,
}

impl core::fmt::Debug for DomSampler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomSampler")
            .field("elements_len", &self.elements.len())
            .finish()
    }
}

impl DomSampler {
    /// Creates a sampler over `elements`.
    #[must_use]
    pub fn new(elements: Vec<HtmlElement>) -> Self {
        Self { elements }
    }

    /// Returns the sampled elements.
    #[must_use]
    pub fn elements(&self) -> &[HtmlElement] {
        &self.elements
    }
}

impl GeometrySampler for DomSampler {
    fn sample(&self) -> Vec<ElementSample> {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, el)| {
                let left = f64::from(el.offset_left());
                let width = f64::from(el.offset_width());
                let height = f64::from(el.offset_height());
                let rendered = el.get_bounding_client_rect().width();
                ElementSample::from_rect(
                    index,
                    Rect::new(left, 0.0, left + width, height),
                    scale_from(rendered, width),
                )
            })
            .collect()
    }
}

/// Horizontal scale from rendered and layout widths.
///
/// Elements with no layout width report unit scale; the timeline builder
/// rejects them for their width instead.
fn scale_from(rendered: f64, layout: f64) -> f64 {
    if layout > 0.0 && rendered.is_finite() && rendered > 0.0 {
        rendered / layout
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_rendered_over_layout() {
        assert_eq!(scale_from(150.0, 100.0), 1.5);
        assert_eq!(scale_from(100.0, 100.0), 1.0);
    }

    #[test]
    fn degenerate_widths_fall_back_to_unit_scale() {
        assert_eq!(scale_from(10.0, 0.0), 1.0);
        assert_eq!(scale_from(0.0, 100.0), 1.0);
        assert_eq!(scale_from(f64::NAN, 100.0), 1.0);
    }
}
