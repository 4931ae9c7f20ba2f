// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconstruction of rendered e-reader pages from an extracted vector
//! glyph payload.
//!
//! The payload (see [`payload`]) carries, per font, SVG-style glyph
//! outlines with advance widths, and, per page, "runs": ordered glyph
//! sequences with literal horizontal anchors, a font reference and an
//! affine transform. Rendering a page means deriving font-wide vertical
//! metrics ([`metrics`]), rasterizing each referenced glyph into an
//! aligned coverage bitmap ([`raster`], memoized by [`cache`]), and
//! compositing the runs onto a white canvas with a shared baseline
//! ([`compose`]).
//!
//! [`render`] wraps this up as file-level operations over an extract
//! directory; [`preview`] rasterizes individual glyphs for inspection.

pub mod cache;
pub mod catalog;
pub mod compose;
mod error;
pub mod fonts;
pub mod metrics;
mod outline;
pub mod payload;
pub mod preview;
pub mod raster;
pub mod render;

pub use cache::GlyphCache;
pub use catalog::{GlyphCatalog, GlyphSpec};
pub use compose::{compose_page, PageStats};
pub use error::Error;
pub use fonts::FontSet;
pub use metrics::FontMetrics;
pub use payload::{Page, Run};
pub use raster::GlyphRender;
pub use render::{render_page, Renderer};
