// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed schema for the extracted renderer payload.
//!
//! The extract directory holds two JSON artifacts: `glyphs.json`, an
//! array of font entries, and a (possibly versioned) `page_data*.json`,
//! an array of page entries. The source renderer emits these as loosely
//! typed dictionaries; this module pins down the fields the core needs
//! and normalizes them once at ingestion, so downstream code never deals
//! with missing keys or mixed value types.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::Error;

/// One font of the extracted payload.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontEntry {
    /// Identifier the page runs use to reference this font.
    pub font_key: String,
    /// Target pixel height for the font, when the payload carries one.
    #[serde(default)]
    pub height: Option<f64>,
    /// Raw glyph table, keyed by glyph id. Entries that are not JSON
    /// objects are dropped during deserialization.
    #[serde(default, deserialize_with = "lenient_glyph_table")]
    pub glyphs: BTreeMap<String, GlyphEntry>,
}

/// One entry of a font's raw glyph table.
///
/// Only `type == "path"` entries with non-empty outline data are
/// renderable; the rest (bitmap, composite, empty) are carried through
/// deserialization and filtered by the metrics builder and catalog.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphEntry {
    /// Glyph kind discriminator from the payload (`"path"`, `"bitmap"`, ...).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// SVG-style outline data, present for path glyphs.
    #[serde(default)]
    pub path: Option<String>,
    /// Advance width in font design units.
    #[serde(default)]
    pub advance_width: Option<f64>,
}

impl GlyphEntry {
    /// Returns the outline data if this is a path glyph with a
    /// non-empty outline.
    pub fn path_data(&self) -> Option<&str> {
        if self.kind.as_deref() != Some("path") {
            return None;
        }
        self.path.as_deref().filter(|data| !data.is_empty())
    }
}

fn lenient_glyph_table<'de, D>(deserializer: D) -> Result<BTreeMap<String, GlyphEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, serde_json::Value> = Deserialize::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(id, value)| {
            let entry = serde_json::from_value::<GlyphEntry>(value).ok()?;
            Some((id, entry))
        })
        .collect())
}

/// A reading position attached to a page, either numeric or the
/// `"major;minor"` string form some payloads use.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PositionValue {
    /// Plain numeric position.
    Number(f64),
    /// Encoded position string.
    Text(String),
}

/// One page of the extracted payload, as serialized by the source
/// renderer.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEntry {
    /// Declared page width in pixels (float in the payload).
    #[serde(default)]
    pub width: f64,
    /// Declared page height in pixels (float in the payload).
    #[serde(default)]
    pub height: f64,
    /// Page children; anything that is not a well-formed run is ignored.
    #[serde(default)]
    pub children: Vec<serde_json::Value>,
    /// Reading position at the start of the page.
    #[serde(default)]
    pub start_position: Option<PositionValue>,
    /// Reading position at the end of the page.
    #[serde(default)]
    pub end_position: Option<PositionValue>,
    /// Numeric position id at the start of the page.
    #[serde(default)]
    pub start_position_id: Option<f64>,
    /// Numeric position id at the end of the page.
    #[serde(default)]
    pub end_position_id: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunEntry {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    font_key: Option<String>,
    #[serde(default)]
    glyphs: Vec<serde_json::Value>,
    #[serde(default)]
    x_position: Vec<f64>,
    #[serde(default)]
    transform: Vec<f64>,
    #[serde(default)]
    font_size: Option<f64>,
}

/// A contiguous sequence of glyphs sharing one font, size and transform,
/// normalized from the payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    /// Font the run is set in.
    pub font_key: String,
    /// Ordered glyph identifiers.
    pub glyph_ids: Vec<String>,
    /// Pixel-space horizontal anchors, one per glyph. May be shorter
    /// than `glyph_ids`; see [`Run::padded_x_positions`].
    pub x_positions: Vec<f64>,
    /// Horizontal translation from the run transform (`transform[4]`).
    pub x_offset: f64,
    /// Vertical translation from the run transform (`transform[5]`).
    pub y_offset: f64,
    /// Font size in pixels; `None` or non-positive falls back to the
    /// font's own height at composite time.
    pub font_size: Option<f64>,
}

impl Run {
    /// X anchors padded to the glyph count by replicating the last
    /// value. The source renderer is known to sometimes omit trailing
    /// duplicates.
    ///
    /// Returns `None` when the run has no glyphs or no anchors at all.
    pub fn padded_x_positions(&self) -> Option<Vec<f64>> {
        if self.glyph_ids.is_empty() || self.x_positions.is_empty() {
            return None;
        }
        let mut xs = self.x_positions.clone();
        if let Some(&last) = xs.last() {
            if xs.len() < self.glyph_ids.len() {
                xs.resize(self.glyph_ids.len(), last);
            }
        }
        Some(xs)
    }
}

/// A page normalized for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    /// Page width in pixels, rounded from the payload float.
    pub width: i32,
    /// Page height in pixels, rounded from the payload float.
    pub height: i32,
    /// Runs in source order. Compositing is order-dependent.
    pub runs: Vec<Run>,
    /// Reading position at the start of the page, if present.
    pub start_position: Option<PositionValue>,
    /// Reading position at the end of the page, if present.
    pub end_position: Option<PositionValue>,
    /// Numeric start position id, if present.
    pub start_position_id: Option<i64>,
    /// Numeric end position id, if present.
    pub end_position_id: Option<i64>,
}

impl Page {
    /// Normalizes a raw page entry.
    ///
    /// Glyph ids are coerced to strings (the payload mixes strings and
    /// numbers), transforms are reduced to their translation components,
    /// and anything that is not a run with a font key is dropped.
    /// Dimension validation is deferred to composite time, where a
    /// non-positive size is a hard error.
    pub fn from_entry(entry: &PageEntry) -> Self {
        let runs = entry
            .children
            .iter()
            .filter_map(|child| {
                let run = serde_json::from_value::<RunEntry>(child.clone()).ok()?;
                if run.kind.as_deref() != Some("run") {
                    return None;
                }
                let font_key = run.font_key?;
                let glyph_ids = run.glyphs.iter().filter_map(glyph_id_string).collect();
                Some(Run {
                    font_key,
                    glyph_ids,
                    x_positions: run.x_position,
                    x_offset: run.transform.get(4).copied().unwrap_or(0.0),
                    y_offset: run.transform.get(5).copied().unwrap_or(0.0),
                    font_size: run.font_size,
                })
            })
            .collect();
        Self {
            width: entry.width.round() as i32,
            height: entry.height.round() as i32,
            runs,
            start_position: entry.start_position.clone(),
            end_position: entry.end_position.clone(),
            start_position_id: entry.start_position_id.map(|id| id as i64),
            end_position_id: entry.end_position_id.map(|id| id as i64),
        }
    }
}

fn glyph_id_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(id) => Some(id.clone()),
        serde_json::Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Loads the font entries of a `glyphs.json` artifact.
pub fn load_font_entries(path: &Path) -> Result<Vec<FontEntry>, Error> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Loads the page entries of a `page_data*.json` artifact.
pub fn load_page_entries(path: &Path) -> Result<Vec<PageEntry>, Error> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
