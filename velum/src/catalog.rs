// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-font glyph lookup.

use std::collections::BTreeMap;

use crate::payload::FontEntry;

/// A renderable glyph: its outline and advance width.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphSpec {
    /// Font the glyph belongs to.
    pub font_key: String,
    /// Identifier of the glyph, unique within the font.
    pub glyph_id: String,
    /// Advance width in font design units, never negative.
    pub advance_width: f64,
    /// SVG-style outline data.
    pub path_data: String,
}

/// Glyph id to [`GlyphSpec`] mapping for one font.
///
/// Only path-type glyphs with non-empty outline data are present.
/// Absence of an id is a normal condition (whitespace, unsupported glyph
/// kinds), not an error; callers skip such glyphs.
#[derive(Clone, Debug, Default)]
pub struct GlyphCatalog {
    glyphs: BTreeMap<String, GlyphSpec>,
}

impl GlyphCatalog {
    /// Builds the catalog from a font's raw glyph table.
    pub fn build(font: &FontEntry) -> Self {
        let glyphs = font
            .glyphs
            .iter()
            .filter_map(|(glyph_id, entry)| {
                let path_data = entry.path_data()?;
                let spec = GlyphSpec {
                    font_key: font.font_key.clone(),
                    glyph_id: glyph_id.clone(),
                    advance_width: entry.advance_width.unwrap_or(0.0).max(0.0),
                    path_data: path_data.to_owned(),
                };
                Some((glyph_id.clone(), spec))
            })
            .collect();
        Self { glyphs }
    }

    /// Looks up a glyph by id.
    pub fn get(&self, glyph_id: &str) -> Option<&GlyphSpec> {
        self.glyphs.get(glyph_id)
    }

    /// Iterates the catalog in glyph-id order.
    pub fn iter(&self) -> impl Iterator<Item = &GlyphSpec> {
        self.glyphs.values()
    }

    /// Number of renderable glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the font has no renderable glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
