// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font-wide vertical metrics derived from glyph outlines.

use crate::outline;
use crate::payload::FontEntry;

/// Vertical extents and scale factors for one font.
///
/// `min_y`/`max_y` form the tightest vertical bounding box over all of
/// the font's parsable path glyphs, in font design units. Every glyph of
/// the font is rasterized against these shared extents, which is what
/// keeps descenders and caps on one baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct FontMetrics {
    /// Identifier the page runs use to reference this font.
    pub font_key: String,
    /// Lowest outline point across the font, design units.
    pub min_y: f64,
    /// Highest outline point across the font, design units.
    pub max_y: f64,
    /// Target pixel height for the font.
    pub height_px: f64,
}

impl FontMetrics {
    /// Height of the font's design-space bounding box.
    pub fn unit_height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Design-unit to pixel factor at the font's own height.
    pub fn scale(&self) -> f64 {
        self.unit_to_px(self.height_px)
    }

    /// Design-unit to pixel factor for an arbitrary target height.
    /// Normalizes to 1.0 for a degenerate zero-height font.
    pub fn unit_to_px(&self, target_height: f64) -> f64 {
        let unit_height = self.unit_height();
        if unit_height == 0.0 {
            1.0
        } else {
            target_height / unit_height
        }
    }

    /// Distance from the font's lowest outline point up to the
    /// design-space origin. Shifting every glyph by this amount makes
    /// all y-coordinates non-negative.
    pub fn baseline_units(&self) -> f64 {
        -self.min_y
    }

    /// Baseline offset in pixels at the font's own height.
    pub fn baseline_px(&self) -> f64 {
        self.baseline_units() * self.unit_to_px(self.height_px)
    }
}

/// Derives [`FontMetrics`] from a font's raw glyph table.
///
/// Glyphs that fail to parse or have no drawable segments are skipped.
/// Returns `None` when no glyph yields a bounding box: such a font
/// cannot anchor any output and is excluded from rendering entirely.
pub fn build_font_metrics(font: &FontEntry) -> Option<FontMetrics> {
    let mut min_y: Option<f64> = None;
    let mut max_y: Option<f64> = None;
    for entry in font.glyphs.values() {
        let Some(path_data) = entry.path_data() else {
            continue;
        };
        let Ok(parsed) = outline::parse_outline(path_data) else {
            continue;
        };
        let Some(rect) = outline::bounds(&parsed) else {
            continue;
        };
        min_y = Some(min_y.map_or(rect.y0, |y: f64| y.min(rect.y0)));
        max_y = Some(max_y.map_or(rect.y1, |y: f64| y.max(rect.y1)));
    }
    let (min_y, max_y) = (min_y?, max_y?);

    let mut height_px = font.height.unwrap_or(0.0);
    if height_px <= 0.0 {
        // Fall back to the raw unit height so scale normalizes to 1.0.
        height_px = max_y - min_y;
    }

    Some(FontMetrics {
        font_key: font.font_key.clone(),
        min_y,
        max_y,
        height_px,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn font(value: serde_json::Value) -> FontEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn metrics_span_all_path_glyphs() {
        let entry = font(json!({
            "fontKey": "F1",
            "height": 20.0,
            "glyphs": {
                "cap": {"type": "path", "path": "M 0 0 L 10 0 L 10 10 L 0 10 Z"},
                "descender": {"type": "path", "path": "M 0 -4 L 6 -4 L 6 8 L 0 8 Z"},
                "bitmap": {"type": "bitmap", "path": "M 0 -99 L 1 99"},
            },
        }));
        let metrics = build_font_metrics(&entry).unwrap();
        assert_eq!(metrics.min_y, -4.0);
        assert_eq!(metrics.max_y, 10.0);
        assert_eq!(metrics.height_px, 20.0);
        assert_eq!(metrics.unit_height(), 14.0);
        assert_eq!(metrics.baseline_units(), 4.0);
    }

    #[test]
    fn metrics_height_falls_back_to_unit_height() {
        for height in [json!(null), json!(0.0), json!(-3.0)] {
            let entry = font(json!({
                "fontKey": "F1",
                "height": height,
                "glyphs": {
                    "g": {"type": "path", "path": "M 0 0 L 10 0 L 10 10 L 0 10 Z"},
                },
            }));
            let metrics = build_font_metrics(&entry).unwrap();
            assert_eq!(metrics.height_px, 10.0);
            assert_eq!(metrics.scale(), 1.0);
        }
    }

    #[test]
    fn metrics_skip_unparsable_glyphs() {
        let entry = font(json!({
            "fontKey": "F1",
            "glyphs": {
                "bad": {"type": "path", "path": "M zero zero"},
                "good": {"type": "path", "path": "M 0 2 L 4 2 L 4 6 L 0 6 Z"},
            },
        }));
        let metrics = build_font_metrics(&entry).unwrap();
        assert_eq!(metrics.min_y, 2.0);
        assert_eq!(metrics.max_y, 6.0);
    }

    #[test]
    fn metrics_none_without_usable_glyphs() {
        let entry = font(json!({
            "fontKey": "F1",
            "glyphs": {
                "text": {"type": "text"},
                "empty": {"type": "path", "path": ""},
                "bare_move": {"type": "path", "path": "M 1 1"},
            },
        }));
        assert!(build_font_metrics(&entry).is_none());
    }

    #[test]
    fn metrics_scale_and_baseline_px() {
        let metrics = FontMetrics {
            font_key: "F1".into(),
            min_y: -5.0,
            max_y: 15.0,
            height_px: 40.0,
        };
        assert_eq!(metrics.scale(), 2.0);
        assert_eq!(metrics.baseline_px(), 10.0);
        assert_eq!(metrics.unit_to_px(10.0), 0.5);
    }

    #[test]
    fn metrics_degenerate_height_guards_division() {
        let metrics = FontMetrics {
            font_key: "F1".into(),
            min_y: 3.0,
            max_y: 3.0,
            height_px: 12.0,
        };
        assert_eq!(metrics.unit_height(), 0.0);
        assert_eq!(metrics.scale(), 1.0);
        assert_eq!(metrics.unit_to_px(99.0), 1.0);
    }
}
