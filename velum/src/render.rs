// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! File-level rendering over an extract directory.
//!
//! An extract directory is the captured renderer payload: `glyphs.json`
//! plus a page-data artifact whose name may carry a version suffix
//! (`page_data.json`, `page_data_0_5.json`, ...).

use std::fs;
use std::path::{Path, PathBuf};

use tiny_skia::Pixmap;

use crate::cache::GlyphCache;
use crate::compose::{compose_page, PageStats};
use crate::error::Error;
use crate::fonts::FontSet;
use crate::payload::{load_font_entries, load_page_entries, Page};

/// Locates a payload artifact that may be versioned.
///
/// Prefers the exact `{base_name}.json`, then the lexicographically
/// first `{base_name}_*.json` match.
pub fn resolve_versioned_json(extract_root: &Path, base_name: &str) -> Result<PathBuf, Error> {
    let exact = extract_root.join(format!("{base_name}.json"));
    if exact.exists() {
        return Ok(exact);
    }
    let prefix = format!("{base_name}_");
    let mut candidates: Vec<PathBuf> = fs::read_dir(extract_root)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let name = path.file_name()?.to_str()?;
            (name.starts_with(&prefix) && name.ends_with(".json")).then_some(path)
        })
        .collect();
    candidates.sort();
    candidates
        .into_iter()
        .next()
        .ok_or(Error::MissingResource { path: exact })
}

/// Renders pages of one extracted payload.
///
/// Fonts and pages are loaded once; the glyph cache is shared across
/// every page rendered through the same instance.
#[derive(Debug)]
pub struct Renderer {
    fonts: FontSet,
    pages: Vec<Page>,
    cache: GlyphCache,
}

impl Renderer {
    /// Loads the payload from an extract directory.
    pub fn from_extract_root(extract_root: &Path) -> Result<Self, Error> {
        let glyphs_path = extract_root.join("glyphs.json");
        if !glyphs_path.exists() {
            return Err(Error::MissingResource { path: glyphs_path });
        }
        let page_data_path = resolve_versioned_json(extract_root, "page_data")?;

        let font_entries = load_font_entries(&glyphs_path)?;
        let page_entries = load_page_entries(&page_data_path)?;
        log::info!(
            "loaded {} fonts and {} pages from {}",
            font_entries.len(),
            page_entries.len(),
            extract_root.display()
        );

        Ok(Self {
            fonts: FontSet::from_entries(&font_entries),
            pages: page_entries.iter().map(Page::from_entry).collect(),
            cache: GlyphCache::new(),
        })
    }

    /// Number of pages in the payload.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The normalized page at `page_index`.
    pub fn page(&self, page_index: usize) -> Result<&Page, Error> {
        self.pages.get(page_index).ok_or(Error::PageOutOfRange {
            index: page_index,
            total: self.pages.len(),
        })
    }

    /// Renders one page to an in-memory canvas.
    pub fn render_page(&mut self, page_index: usize) -> Result<(Pixmap, PageStats), Error> {
        let page = self.pages.get(page_index).ok_or(Error::PageOutOfRange {
            index: page_index,
            total: self.pages.len(),
        })?;
        compose_page(page, &self.fonts, &mut self.cache)
    }

    /// Renders one page and writes it as a PNG named by its zero-padded
    /// index. Returns the output path and the compositing diagnostics.
    pub fn render_page_to(
        &mut self,
        output_dir: &Path,
        page_index: usize,
    ) -> Result<(PathBuf, PageStats), Error> {
        let (canvas, stats) = self.render_page(page_index)?;
        fs::create_dir_all(output_dir)?;
        let output_path = output_dir.join(format!("page_{page_index:04}.png"));
        canvas
            .save_png(&output_path)
            .map_err(|err| Error::Encode(err.to_string()))?;
        if !stats.skipped_glyphs.is_empty() || stats.skipped_runs > 0 {
            log::warn!(
                "page {page_index}: {} glyphs and {} runs skipped",
                stats.skipped_glyphs.len(),
                stats.skipped_runs
            );
        }
        Ok((output_path, stats))
    }
}

/// Renders a single page of an extract directory to a PNG.
///
/// One-shot form of [`Renderer`]: loads the payload, renders
/// `page_index` into `output_dir` and returns the written path.
pub fn render_page(
    extract_root: &Path,
    output_dir: &Path,
    page_index: usize,
) -> Result<PathBuf, Error> {
    let mut renderer = Renderer::from_extract_root(extract_root)?;
    let (output_path, _) = renderer.render_page_to(output_dir, page_index)?;
    Ok(output_path)
}
