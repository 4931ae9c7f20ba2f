// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph outline parsing and measurement.
//!
//! Outlines arrive as SVG path data in font design units, y-down. Both
//! the metrics builder and the rasterizer measure outlines through this
//! module so they agree on what "unusable" means.

use kurbo::{BezPath, PathEl, Rect, Shape as _};

/// Parses SVG path data into a bezier path.
pub(crate) fn parse_outline(path_data: &str) -> Result<BezPath, String> {
    BezPath::from_svg(path_data).map_err(|err| err.to_string())
}

/// Returns the exact bounding box of an outline, or `None` for an
/// outline with no drawable segments (e.g. a bare move-to).
pub(crate) fn bounds(outline: &BezPath) -> Option<Rect> {
    if outline.segments().next().is_none() {
        return None;
    }
    Some(outline.bounding_box())
}

/// Converts a bezier path into a fillable `tiny-skia` path.
///
/// Returns `None` when the path has no usable geometry.
pub(crate) fn to_pixmap_path(outline: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::new();
    for el in outline.elements() {
        match el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => {
                builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32);
            }
            PathEl::CurveTo(c0, c1, p) => {
                builder.cubic_to(
                    c0.x as f32,
                    c0.y as f32,
                    c1.x as f32,
                    c1.y as f32,
                    p.x as f32,
                    p.y as f32,
                );
            }
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}
