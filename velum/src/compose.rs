// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compositing a page's runs onto a canvas.

use serde::Serialize;
use tiny_skia::{Color, Pixmap, PixmapPaint, Transform};

use crate::cache::GlyphCache;
use crate::error::Error;
use crate::fonts::FontSet;
use crate::payload::Page;
use crate::raster::rasterize_glyph;

/// A glyph reference that could not be resolved during compositing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedGlyph {
    /// Font the run asked for.
    pub font_key: String,
    /// Glyph id absent from that font's catalog.
    pub glyph_id: String,
}

/// Per-page compositing diagnostics.
///
/// Missing fonts and glyphs are tolerated: the page still renders, with
/// gaps. The source renderer swallows these silently, which can corrupt
/// reconstructed text without a trace, so the skips are reported here
/// for the caller to surface.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PageStats {
    /// Glyphs pasted onto the canvas.
    pub pasted_glyphs: usize,
    /// Runs skipped because their font had no usable metrics.
    pub skipped_runs: usize,
    /// Glyph references dropped because the id was absent from the
    /// font's catalog (whitespace and unsupported glyph kinds land
    /// here).
    pub skipped_glyphs: Vec<SkippedGlyph>,
}

/// Renders a page onto a fresh white canvas.
///
/// Runs and glyphs are processed strictly in source order; later pastes
/// overdraw earlier ones. Glyph renders are fetched through `cache`, so
/// repeated glyphs rasterize once per (font, glyph, size).
pub fn compose_page(
    page: &Page,
    fonts: &FontSet,
    cache: &mut GlyphCache,
) -> Result<(Pixmap, PageStats), Error> {
    if page.width <= 0 || page.height <= 0 {
        return Err(Error::InvalidPageDimensions {
            width: page.width,
            height: page.height,
        });
    }
    let mut canvas = Pixmap::new(page.width as u32, page.height as u32).ok_or(Error::Canvas {
        width: page.width as u32,
        height: page.height as u32,
    })?;
    canvas.fill(Color::WHITE);

    let mut stats = PageStats::default();
    for run in &page.runs {
        let Some(metrics) = fonts.metrics(&run.font_key) else {
            log::warn!("run references unusable font {}, skipped", run.font_key);
            stats.skipped_runs += 1;
            continue;
        };
        let Some(x_positions) = run.padded_x_positions() else {
            continue;
        };
        let font_size = run
            .font_size
            .filter(|size| *size > 0.0)
            .unwrap_or(metrics.height_px);
        let Some(catalog) = fonts.catalog(&run.font_key) else {
            stats.skipped_runs += 1;
            continue;
        };

        for (glyph_id, &x_position) in run.glyph_ids.iter().zip(x_positions.iter()) {
            let Some(spec) = catalog.get(glyph_id) else {
                log::debug!("glyph {}:{glyph_id} not in catalog, skipped", run.font_key);
                stats.skipped_glyphs.push(SkippedGlyph {
                    font_key: run.font_key.clone(),
                    glyph_id: glyph_id.clone(),
                });
                continue;
            };
            let render = cache.get_or_render(&run.font_key, glyph_id, font_size, || {
                rasterize_glyph(spec, metrics, font_size)
            })?;

            let left = (run.x_offset + x_position).round() as i32;
            let top = (run.y_offset - f64::from(render.baseline_px())).round() as i32;
            canvas.draw_pixmap(
                left,
                top,
                render.pixmap().as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
            stats.pasted_glyphs += 1;
        }
    }
    Ok((canvas, stats))
}
