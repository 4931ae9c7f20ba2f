// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Standalone glyph rasterization for inspection and debugging.
//!
//! Independent of page compositing: each glyph is rendered at its
//! font's own height onto a white background, written as one PNG, and
//! described by a manifest record carrying the numbers that went into
//! the render.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tiny_skia::{Color, Pixmap, PixmapPaint, Transform};

use crate::catalog::GlyphSpec;
use crate::error::Error;
use crate::metrics::FontMetrics;
use crate::raster::{rasterize_outline, GlyphGeometry};

/// Manifest record for one previewed glyph.
#[derive(Clone, Debug, Serialize)]
pub struct GlyphManifestEntry {
    /// Path of the written PNG.
    pub path: String,
    /// Font the glyph belongs to.
    pub font_key: String,
    /// Glyph identifier within the font.
    pub glyph_id: String,
    /// Advance width in design units.
    pub advance_width_units: f64,
    /// Canvas width in design units.
    pub canvas_width_units: f64,
    /// Canvas height in design units.
    pub canvas_height_units: f64,
    /// Canvas width in pixels.
    pub canvas_width_px: u32,
    /// Canvas height in pixels.
    pub canvas_height_px: u32,
    /// Outline bounding box, design units.
    pub xmin: f64,
    /// See `xmin`.
    pub xmax: f64,
    /// See `xmin`.
    pub ymin: f64,
    /// See `xmin`.
    pub ymax: f64,
    /// Horizontal shift applied to the outline.
    pub translate_x: f64,
    /// Vertical shift applied to the outline.
    pub translate_y: f64,
    /// Position in the preview sequence, when rendered as part of a
    /// batch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
}

/// Rasterizes one glyph at its font's own height and writes it to
/// `output_dir` as `{font_key}_{glyph_id}.png`.
pub fn render_glyph(
    spec: &GlyphSpec,
    metrics: &FontMetrics,
    output_dir: &Path,
) -> Result<GlyphManifestEntry, Error> {
    let (parsed, geometry) = GlyphGeometry::compute(spec, metrics, metrics.height_px)?;
    let render = rasterize_outline(&parsed, &geometry, metrics.height_px)?;

    // Flatten onto white so the PNG is viewable on its own.
    let mut flattened = Pixmap::new(render.width(), render.height()).ok_or(Error::Canvas {
        width: render.width(),
        height: render.height(),
    })?;
    flattened.fill(Color::WHITE);
    flattened.draw_pixmap(
        0,
        0,
        render.pixmap().as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );

    fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(format!("{}_{}.png", spec.font_key, spec.glyph_id));
    flattened
        .save_png(&output_path)
        .map_err(|err| Error::Encode(err.to_string()))?;

    Ok(GlyphManifestEntry {
        path: output_path.display().to_string(),
        font_key: spec.font_key.clone(),
        glyph_id: spec.glyph_id.clone(),
        advance_width_units: spec.advance_width,
        canvas_width_units: geometry.canvas_width_units,
        canvas_height_units: geometry.canvas_height_units,
        canvas_width_px: geometry.canvas_width_px,
        canvas_height_px: geometry.canvas_height_px,
        xmin: geometry.xmin,
        xmax: geometry.xmax,
        ymin: geometry.ymin,
        ymax: geometry.ymax,
        translate_x: geometry.translate_x,
        translate_y: geometry.translate_y,
        order: None,
    })
}
