// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rasterization of a single glyph into an aligned coverage bitmap.

use tiny_skia::{Color, FillRule, Paint, Pixmap, Transform};

use crate::catalog::GlyphSpec;
use crate::error::Error;
use crate::metrics::FontMetrics;
use crate::outline;

/// Placement of a glyph on its rasterization canvas.
///
/// The outline is shifted right by `translate_x` so left-overshooting
/// glyphs land fully in positive x, and down by `translate_y` (the
/// font-wide baseline shift) so the font's global lowest point sits at
/// the canvas bottom edge. The canvas is wide enough for either the
/// nominal advance or any outline overshoot past it, and exactly one
/// font unit-height tall.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphGeometry {
    /// Outline bounding box, design units: `(xmin, ymin, xmax, ymax)`.
    pub xmin: f64,
    /// See `xmin`.
    pub ymin: f64,
    /// See `xmin`.
    pub xmax: f64,
    /// See `xmin`.
    pub ymax: f64,
    /// Horizontal shift applied to the outline, design units.
    pub translate_x: f64,
    /// Vertical shift applied to the outline, design units.
    pub translate_y: f64,
    /// Canvas width in design units.
    pub canvas_width_units: f64,
    /// Canvas height in design units.
    pub canvas_height_units: f64,
    /// Design-unit to pixel factor for the target font size.
    pub unit_to_px: f64,
    /// Canvas width in pixels, always at least 1.
    pub canvas_width_px: u32,
    /// Canvas height in pixels, always at least 1.
    pub canvas_height_px: u32,
}

impl GlyphGeometry {
    /// Computes the canvas placement for a glyph at a target font size.
    pub fn compute(
        spec: &GlyphSpec,
        metrics: &FontMetrics,
        font_size: f64,
    ) -> Result<(kurbo::BezPath, Self), Error> {
        let bad_outline = |reason: String| Error::BadOutline {
            font_key: spec.font_key.clone(),
            glyph_id: spec.glyph_id.clone(),
            reason,
        };
        let parsed = outline::parse_outline(&spec.path_data).map_err(bad_outline)?;
        let rect = outline::bounds(&parsed)
            .ok_or_else(|| bad_outline("outline has no drawable segments".into()))?;

        let translate_x = -rect.x0.min(0.0);
        let translate_y = metrics.baseline_units();
        let xmax_shifted = rect.x1 + translate_x;

        let canvas_width_units = spec.advance_width.max(xmax_shifted);
        let canvas_height_units = metrics.unit_height();
        let unit_to_px = metrics.unit_to_px(font_size);

        let geometry = Self {
            xmin: rect.x0,
            ymin: rect.y0,
            xmax: rect.x1,
            ymax: rect.y1,
            translate_x,
            translate_y,
            canvas_width_units,
            canvas_height_units,
            unit_to_px,
            canvas_width_px: to_px(canvas_width_units * unit_to_px),
            canvas_height_px: to_px(canvas_height_units * unit_to_px),
        };
        Ok((parsed, geometry))
    }
}

// Degenerate (zero-area) glyphs still get a 1x1 canvas.
fn to_px(units: f64) -> u32 {
    (units.round() as i64).max(1) as u32
}

/// A rasterized glyph ready for compositing.
///
/// The pixmap holds the glyph filled solid black over a transparent
/// background; its alpha channel is both the grayscale coverage and the
/// paste mask, so compositing it source-over reproduces a masked paste.
#[derive(Clone)]
pub struct GlyphRender {
    pixmap: Pixmap,
    baseline_px: f32,
    font_size: f32,
}

impl std::fmt::Debug for GlyphRender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphRender")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("baseline_px", &self.baseline_px)
            .field("font_size", &self.font_size)
            .finish()
    }
}

impl GlyphRender {
    /// The coverage bitmap.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Baseline offset for this render, scaled to the font size it was
    /// rendered at.
    pub fn baseline_px(&self) -> f32 {
        self.baseline_px
    }

    /// The font size this glyph was rendered at, in pixels.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Grayscale coverage, row-major, one byte per pixel. 0 is blank,
    /// 255 is fully inked.
    pub fn coverage(&self) -> Vec<u8> {
        self.pixmap.pixels().iter().map(|px| px.alpha()).collect()
    }
}

/// Rasterizes one glyph at a target font size.
///
/// Callers are expected to have filtered unusable outlines out at
/// catalog-build time; an unparsable outline here is an error for this
/// glyph.
pub fn rasterize_glyph(
    spec: &GlyphSpec,
    metrics: &FontMetrics,
    font_size: f64,
) -> Result<GlyphRender, Error> {
    let (parsed, geometry) = GlyphGeometry::compute(spec, metrics, font_size)?;
    rasterize_outline(&parsed, &geometry, font_size)
}

/// Rasterizes an already-parsed outline onto the canvas its geometry
/// describes. Lets callers that need the [`GlyphGeometry`] compute it
/// once and render from it.
pub fn rasterize_outline(
    parsed: &kurbo::BezPath,
    geometry: &GlyphGeometry,
    font_size: f64,
) -> Result<GlyphRender, Error> {
    let mut pixmap =
        Pixmap::new(geometry.canvas_width_px, geometry.canvas_height_px).ok_or(Error::Canvas {
            width: geometry.canvas_width_px,
            height: geometry.canvas_height_px,
        })?;

    if let Some(path) = outline::to_pixmap_path(parsed) {
        let mut paint = Paint::default();
        paint.set_color(Color::BLACK);
        paint.anti_alias = true;
        // Outline coordinates are y-down, same as the pixmap; shift into
        // the canvas, then scale design units to pixels.
        let transform = Transform::from_translate(
            geometry.translate_x as f32,
            geometry.translate_y as f32,
        )
        .post_scale(geometry.unit_to_px as f32, geometry.unit_to_px as f32);
        pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
    }

    Ok(GlyphRender {
        pixmap,
        baseline_px: (geometry.translate_y * geometry.unit_to_px) as f32,
        font_size: font_size as f32,
    })
}
