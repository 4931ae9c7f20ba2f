// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batch rendering of a page range with optional OCR.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use velum::Renderer;

use crate::chunk::{build_chunk_id, page_position, PositionKind};
use crate::ocr;

/// What to render and where to put it.
#[derive(Clone, Debug)]
pub(crate) struct PipelineOptions {
    /// Extract directory holding `glyphs.json` and `page_data*.json`.
    pub(crate) extract_root: PathBuf,
    /// Directory for rendered PNGs and OCR output.
    pub(crate) output_dir: PathBuf,
    /// First page index to render.
    pub(crate) start_page: usize,
    /// Maximum number of pages to render, at least one.
    pub(crate) max_pages: usize,
    /// Whether to attempt OCR on each rendered page.
    pub(crate) ocr: bool,
}

/// One rendered page in the summary.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct PageRecord {
    /// Page index within the payload.
    pub(crate) index: usize,
    /// Path of the written PNG.
    pub(crate) png: String,
    /// Chunk the page belongs to.
    pub(crate) chunk_id: String,
    /// Glyph references dropped while compositing this page.
    pub(crate) skipped_glyphs: usize,
    /// Runs dropped because their font was unusable.
    pub(crate) skipped_runs: usize,
}

/// Machine-readable pipeline summary, printed as JSON.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct Summary {
    /// Identifier of the rendered page range.
    pub(crate) chunk_id: String,
    /// Directory the page PNGs were written to.
    pub(crate) pages_dir: String,
    /// Normalized reading position at the range start.
    pub(crate) start_position: String,
    /// Normalized reading position at the range end.
    pub(crate) end_position: String,
    /// Raw start position as it appeared in the payload.
    pub(crate) start_position_raw: String,
    /// Raw end position as it appeared in the payload.
    pub(crate) end_position_raw: String,
    /// Numeric start position id, when present.
    pub(crate) start_position_id: Option<i64>,
    /// Numeric end position id, when present.
    pub(crate) end_position_id: Option<i64>,
    /// Total pages in the payload.
    pub(crate) total_pages: usize,
    /// Pages actually rendered.
    pub(crate) processed_pages: usize,
    /// Per-page records.
    pub(crate) pages: Vec<PageRecord>,
    /// Path of the combined OCR text, when any text was recognized.
    pub(crate) combined_text_path: Option<String>,
    /// Whether OCR ran.
    pub(crate) ocr_enabled: bool,
}

/// Renders the requested page range, optionally OCRs each page, and
/// returns the summary.
pub(crate) fn run_pipeline(options: &PipelineOptions) -> Result<Summary, Box<dyn std::error::Error>> {
    let mut renderer = Renderer::from_extract_root(&options.extract_root)?;
    let total_pages = renderer.page_count();

    let start_index = options.start_page;
    let end_index = total_pages
        .min(start_index + options.max_pages.max(1))
        .max(start_index + 1);

    let start_meta = page_position(renderer.page(start_index)?, PositionKind::Start)
        .ok_or_else(|| format!("page {start_index} has no usable start position"))?;
    let end_meta = page_position(renderer.page(end_index - 1)?, PositionKind::End)
        .ok_or_else(|| format!("page {} has no usable end position", end_index - 1))?;
    let chunk_id = build_chunk_id(&start_meta, &end_meta);

    let pages_dir = options.output_dir.join("pages").join(&chunk_id);
    let ocr_enabled = options.ocr && ocr::ocr_available();
    if options.ocr && !ocr_enabled {
        log::warn!("ocr requested but the tesseract binary is not available");
    }

    let mut combined_text = Vec::new();
    let mut pages = Vec::new();
    for page_index in start_index..end_index {
        let (png_path, stats) = renderer.render_page_to(&pages_dir, page_index)?;
        log::info!(
            "rendered page {page_index} ({} glyphs, {} skipped)",
            stats.pasted_glyphs,
            stats.skipped_glyphs.len()
        );

        if ocr_enabled {
            if let Some(text) = ocr::run_ocr(&png_path) {
                combined_text.push(text);
            }
        }

        pages.push(PageRecord {
            index: page_index,
            png: png_path.display().to_string(),
            chunk_id: chunk_id.clone(),
            skipped_glyphs: stats.skipped_glyphs.len(),
            skipped_runs: stats.skipped_runs,
        });
    }

    let combined_text_path = if combined_text.is_empty() {
        None
    } else {
        let path = options.output_dir.join("full-content.txt");
        fs::create_dir_all(&options.output_dir)?;
        fs::write(&path, combined_text.join("\n\n"))?;
        Some(path.display().to_string())
    };

    Ok(Summary {
        chunk_id,
        pages_dir: pages_dir.display().to_string(),
        start_position: start_meta.normalized,
        end_position: end_meta.normalized,
        start_position_raw: start_meta.raw,
        end_position_raw: end_meta.raw,
        start_position_id: start_meta.position_id,
        end_position_id: end_meta.position_id,
        total_pages,
        processed_pages: pages.len(),
        pages,
        combined_text_path,
        ocr_enabled,
    })
}
