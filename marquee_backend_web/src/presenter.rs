// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM presentation.
//!
//! Writes each [`LoopFrame`]'s per-element translation to the elements'
//! inline `transform` style. Elements whose translation did not change
//! since the previous frame are left alone.
//!
//! [`LoopFrame`]: marquee_core::player::LoopFrame

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use marquee_core::backend::Presenter;
use marquee_core::player::LoopFrame;
use marquee_core::timeline::ElementPosition;
use web_sys::HtmlElement;

/// How a translation is written to CSS.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CssTransform {
    /// `translateX(<x>px)`.
    #[default]
    Pixels,
    /// `translateX(<x>%)`, relative to the element's own width.
    Percent,
    /// `matrix(a, b, c, d, e, f)` from the position's affine transform.
    Matrix,
}

impl CssTransform {
    /// CSS `transform` value for `position`.
    #[must_use]
    pub fn format(self, position: &ElementPosition) -> String {
        match self {
            Self::Pixels => format!("translateX({}px)", position.x),
            Self::Percent => format!("translateX({}%)", position.x_percent()),
            Self::Matrix => {
                let [a, b, c, d, e, f] = position.transform().as_coeffs();
                format!("matrix({a}, {b}, {c}, {d}, {e}, {f})")
            }
        }
    }
}

/// Applies loop frames to a fixed list of DOM elements.
///
/// Elements are matched to positions by index; extra positions or elements
/// are ignored.
pub struct DomPresenter {
    elements: Vec<HtmlElement>,
    applied: Vec<Option<f64>>,
    style: CssTransform,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("elements_len", &self.elements.len())
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates a presenter for `elements`, in visual order.
    #[must_use]
    pub fn new(elements: Vec<HtmlElement>) -> Self {
        let applied = alloc::vec![None; elements.len()];
        Self {
            elements,
            applied,
            style: CssTransform::default(),
        }
    }

    /// Uses `style` for every subsequent write.
    #[must_use]
    pub fn with_style(mut self, style: CssTransform) -> Self {
        self.style = style;
        self.invalidate();
        self
    }

    /// Returns the managed elements.
    #[must_use]
    pub fn elements(&self) -> &[HtmlElement] {
        &self.elements
    }

    /// Forces every element to be rewritten on the next frame.
    pub fn invalidate(&mut self) {
        self.applied.fill(None);
    }

    /// Removes the inline transforms written so far.
    pub fn clear(&mut self) {
        for el in &self.elements {
            let _ = el.style().remove_property("transform");
        }
        self.invalidate();
    }
}

impl Presenter for DomPresenter {
    fn apply(&mut self, frame: &LoopFrame) {
        for ((el, applied), position) in self
            .elements
            .iter()
            .zip(&mut self.applied)
            .zip(&frame.positions)
        {
            if *applied == Some(position.x) {
                continue;
            }
            let _ = el
                .style()
                .set_property("transform", &self.style.format(position));
            *applied = Some(position.x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(x: f64) -> ElementPosition {
        ElementPosition {
            index: 0,
            x,
            width: 200.0,
        }
    }

    #[test]
    fn formats_each_style() {
        let p = position(-50.0);
        assert_eq!(CssTransform::Pixels.format(&p), "translateX(-50px)");
        assert_eq!(CssTransform::Percent.format(&p), "translateX(-25%)");
        assert_eq!(
            CssTransform::Matrix.format(&p),
            "matrix(1, 0, 0, 1, -50, 0)"
        );
    }
}
