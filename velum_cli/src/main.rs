// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pipeline binary over the `velum` rendering core.

use std::path::PathBuf;
use std::process::ExitCode;

use velum::catalog::GlyphCatalog;
use velum::metrics::build_font_metrics;
use velum::payload::load_font_entries;
use velum::{preview, Error};

mod chunk;
mod ocr;
mod pipeline;

#[derive(clap::Parser, Debug)]
#[command(name = "velum", about = "Render extracted e-reader pages and run OCR.")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Render a range of pages, optionally OCR them, and print a JSON
    /// summary of the processed chunk
    Pages {
        /// Path to the extracted renderer payload (contains glyphs.json,
        /// page_data_*.json)
        #[arg(long)]
        extract_root: PathBuf,
        /// Directory to write rendered PNGs and OCR outputs
        #[arg(long)]
        output_dir: PathBuf,
        /// Page index to start from
        #[arg(long, default_value_t = 0)]
        start_page: usize,
        /// Maximum number of pages to process
        #[arg(long, default_value_t = 5)]
        max_pages: usize,
        /// Run OCR on each rendered page via the tesseract binary
        #[arg(long)]
        ocr: bool,
    },
    /// Rasterize individual glyphs to PNGs with a manifest, for
    /// inspection
    Glyphs {
        /// Path to the extracted renderer payload
        #[arg(long)]
        extract_root: PathBuf,
        /// Directory to write glyph PNGs and manifest.json
        #[arg(long)]
        output_dir: PathBuf,
        /// Stop after this many glyphs
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = <Args as clap::Parser>::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        Command::Pages {
            extract_root,
            output_dir,
            start_page,
            max_pages,
            ocr,
        } => {
            let summary = pipeline::run_pipeline(&pipeline::PipelineOptions {
                extract_root,
                output_dir,
                start_page,
                max_pages,
                ocr,
            })?;
            println!("{}", serde_json::to_string(&summary)?);
            Ok(())
        }
        Command::Glyphs {
            extract_root,
            output_dir,
            limit,
        } => run_glyph_preview(&extract_root, &output_dir, limit),
    }
}

/// Renders the first `limit` path glyphs across all usable fonts and
/// writes a `manifest.json` describing each render.
fn run_glyph_preview(
    extract_root: &std::path::Path,
    output_dir: &std::path::Path,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let glyphs_path = extract_root.join("glyphs.json");
    if !glyphs_path.exists() {
        return Err(Box::new(Error::MissingResource { path: glyphs_path }));
    }
    let font_entries = load_font_entries(&glyphs_path)?;

    let mut manifest = Vec::new();
    'fonts: for entry in &font_entries {
        let Some(metrics) = build_font_metrics(entry) else {
            log::warn!("font {} has no usable path glyphs, skipped", entry.font_key);
            continue;
        };
        let catalog = GlyphCatalog::build(entry);
        for spec in catalog.iter() {
            if manifest.len() >= limit {
                break 'fonts;
            }
            let mut record = preview::render_glyph(spec, &metrics, output_dir)?;
            record.order = Some(manifest.len() + 1);
            println!(
                "[{:02}] {}:{} -> {} {}x{}px",
                manifest.len() + 1,
                spec.font_key,
                spec.glyph_id,
                record.path,
                record.canvas_width_px,
                record.canvas_height_px
            );
            manifest.push(record);
        }
    }

    std::fs::create_dir_all(output_dir)?;
    let manifest_path = output_dir.join("manifest.json");
    std::fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;
    println!("wrote manifest to {}", manifest_path.display());
    Ok(())
}
