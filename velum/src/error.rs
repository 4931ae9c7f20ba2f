// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

/// Failures surfaced to callers of the rendering core.
///
/// Unusable fonts and glyphs are deliberately not represented here: they
/// are excluded from the metrics/catalog maps at build time and skipped
/// during compositing, with counts reported via
/// [`PageStats`](crate::PageStats).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required payload file is absent from the extract directory.
    #[error("missing resource: {}", path.display())]
    MissingResource {
        /// The path that was expected to exist.
        path: PathBuf,
    },

    /// The requested page index is beyond the available pages.
    #[error("page index {index} out of bounds (total pages: {total})")]
    PageOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of pages in the payload.
        total: usize,
    },

    /// A page declared non-positive pixel dimensions.
    #[error("invalid page dimensions width={width} height={height}")]
    InvalidPageDimensions {
        /// Declared width, rounded to pixels.
        width: i32,
        /// Declared height, rounded to pixels.
        height: i32,
    },

    /// The rasterizer was invoked on an outline it cannot use.
    ///
    /// Catalog construction filters these out, so hitting this means the
    /// payload changed between catalog build and rasterization.
    #[error("glyph {font_key}:{glyph_id} has an unusable outline: {reason}")]
    BadOutline {
        /// Font the glyph belongs to.
        font_key: String,
        /// Identifier of the glyph within the font.
        glyph_id: String,
        /// What went wrong while parsing or measuring the outline.
        reason: String,
    },

    /// A canvas could not be allocated for the computed dimensions.
    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The payload JSON did not match the expected schema.
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Encoding a rendered canvas to PNG failed.
    #[error("png encoding failed: {0}")]
    Encode(String),

    /// An underlying I/O operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
