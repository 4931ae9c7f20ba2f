// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Metrics and catalogs for every usable font of a payload.

use std::collections::HashMap;

use crate::catalog::GlyphCatalog;
use crate::metrics::{build_font_metrics, FontMetrics};
use crate::payload::FontEntry;

/// The fonts of one extracted payload, ready for rendering.
///
/// Fonts without a single parsable path glyph are excluded entirely:
/// with no metrics they cannot anchor any output, and every run
/// referencing them is skipped at composite time.
#[derive(Debug, Default)]
pub struct FontSet {
    metrics: HashMap<String, FontMetrics>,
    catalogs: HashMap<String, GlyphCatalog>,
}

impl FontSet {
    /// Builds metrics and catalogs for every usable font entry.
    pub fn from_entries(entries: &[FontEntry]) -> Self {
        let mut metrics = HashMap::new();
        let mut catalogs = HashMap::new();
        for entry in entries {
            let Some(font_metrics) = build_font_metrics(entry) else {
                log::warn!("font {} has no usable path glyphs, excluded", entry.font_key);
                continue;
            };
            catalogs.insert(entry.font_key.clone(), GlyphCatalog::build(entry));
            metrics.insert(entry.font_key.clone(), font_metrics);
        }
        Self { metrics, catalogs }
    }

    /// Metrics for a font, if the font is usable.
    pub fn metrics(&self, font_key: &str) -> Option<&FontMetrics> {
        self.metrics.get(font_key)
    }

    /// Glyph catalog for a font, if the font is usable.
    pub fn catalog(&self, font_key: &str) -> Option<&GlyphCatalog> {
        self.catalogs.get(font_key)
    }

    /// Number of usable fonts.
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Whether the payload yielded no usable font at all.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
