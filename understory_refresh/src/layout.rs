// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of the glyph and spinner inside the control's bounds.

use kurbo::{Point, Rect, Size};

/// Control-local rectangles for the renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IndicatorLayout {
    /// The background, covering the whole control.
    pub background: Rect,
    /// The arrow glyph. The spinner shares this rectangle.
    pub glyph: Rect,
}

impl IndicatorLayout {
    /// Lays out a control of `size`.
    ///
    /// The glyph is centered horizontally and sits in the middle of the last
    /// `activation_height` of the control, the band revealed by a full pull.
    #[must_use]
    pub fn compute(size: Size, glyph_size: Size, activation_height: f64) -> Self {
        let center = Point::new(size.width / 2.0, size.height - activation_height / 2.0);
        Self {
            background: size.to_rect(),
            glyph: Rect::from_center_size(center, glyph_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_centers_in_activation_band() {
        let layout = IndicatorLayout::compute(Size::new(320.0, 80.0), Size::new(30.0, 30.0), 80.0);
        assert_eq!(layout.background, Rect::new(0.0, 0.0, 320.0, 80.0));
        assert_eq!(layout.glyph, Rect::new(145.0, 25.0, 175.0, 55.0));
    }

    #[test]
    fn taller_controls_keep_glyph_near_the_bottom() {
        let layout = IndicatorLayout::compute(Size::new(100.0, 200.0), Size::new(20.0, 20.0), 80.0);
        assert_eq!(layout.glyph.center(), Point::new(50.0, 160.0));
    }
}
