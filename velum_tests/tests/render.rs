// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end rendering over an extract directory.

use pretty_assertions::assert_eq;
use velum::{render_page, Error, Renderer};

use crate::util::{luma, ExtractRoot};

#[test]
fn render_unit_square_scenario() {
    let root = ExtractRoot::new();
    root.write_unit_square_font();
    root.write_pages(&crate::util::unit_square_page());

    let mut renderer = Renderer::from_extract_root(root.path()).unwrap();
    assert_eq!(renderer.page_count(), 1);
    let (canvas, stats) = renderer.render_page(0).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (50, 20));
    assert_eq!(stats.pasted_glyphs, 1);

    // The square is scaled 2x (font height 20 over unit height 10), so
    // it spans x in [5, 25) and the full page height: baseline_px is 0
    // because min_y is 0, putting its bottom on the page bottom.
    assert_eq!(luma(&canvas, 4, 10), 255);
    assert_eq!(luma(&canvas, 6, 10), 0);
    assert_eq!(luma(&canvas, 24, 10), 0);
    assert_eq!(luma(&canvas, 26, 10), 255);
    assert_eq!(luma(&canvas, 15, 1), 0);
    assert_eq!(luma(&canvas, 15, 18), 0);
}

#[test]
fn render_writes_zero_padded_png() {
    let root = ExtractRoot::new();
    root.write_unit_square_font();
    root.write_pages(&crate::util::unit_square_page());

    let output_path = render_page(root.path(), &root.output_dir(), 0).unwrap();
    assert_eq!(
        output_path.file_name().unwrap().to_str().unwrap(),
        "page_0000.png"
    );
    let canvas = tiny_skia::Pixmap::load_png(&output_path).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (50, 20));
    assert_eq!(luma(&canvas, 15, 10), 0);
}

#[test]
fn render_page_out_of_range_is_fatal() {
    let root = ExtractRoot::new();
    root.write_unit_square_font();
    root.write_pages(&crate::util::unit_square_page());

    let err = render_page(root.path(), &root.output_dir(), 7).unwrap_err();
    assert!(matches!(
        err,
        Error::PageOutOfRange { index: 7, total: 1 }
    ));
}

#[test]
fn render_invalid_dimensions_is_fatal() {
    let root = ExtractRoot::new();
    root.write_unit_square_font();
    root.write_pages(&serde_json::json!([
        {"width": 0.0, "height": 20.0, "children": []},
    ]));

    let err = render_page(root.path(), &root.output_dir(), 0).unwrap_err();
    assert!(matches!(err, Error::InvalidPageDimensions { .. }));
}

#[test]
fn render_missing_glyph_produces_gap_not_error() {
    let root = ExtractRoot::new();
    root.write_unit_square_font();
    root.write_pages(&serde_json::json!([
        {
            "width": 60.0,
            "height": 20.0,
            "children": [
                {
                    "type": "run",
                    "fontKey": "F1",
                    "glyphs": ["missing", "g1"],
                    "xPosition": [0.0, 30.0],
                    "transform": [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
                    "fontSize": 20.0,
                },
            ],
        },
    ]));

    let mut renderer = Renderer::from_extract_root(root.path()).unwrap();
    let (canvas, stats) = renderer.render_page(0).unwrap();
    assert_eq!(stats.pasted_glyphs, 1);
    assert_eq!(stats.skipped_glyphs.len(), 1);
    assert_eq!(stats.skipped_glyphs[0].glyph_id, "missing");
    // Gap where the missing glyph would have been, ink where g1 is.
    assert_eq!(luma(&canvas, 10, 10), 255);
    assert_eq!(luma(&canvas, 40, 10), 0);
}

#[test]
fn render_run_with_short_x_positions_is_padded() {
    let root = ExtractRoot::new();
    root.write_unit_square_font();
    // Two glyphs, one anchor: the second glyph reuses the last anchor
    // and overdraws the first.
    root.write_pages(&serde_json::json!([
        {
            "width": 50.0,
            "height": 20.0,
            "children": [
                {
                    "type": "run",
                    "fontKey": "F1",
                    "glyphs": ["g1", "g1"],
                    "xPosition": [5.0],
                    "transform": [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
                    "fontSize": 20.0,
                },
            ],
        },
    ]));

    let mut renderer = Renderer::from_extract_root(root.path()).unwrap();
    let (canvas, stats) = renderer.render_page(0).unwrap();
    assert_eq!(stats.pasted_glyphs, 2);
    assert_eq!(luma(&canvas, 15, 10), 0);
    assert_eq!(luma(&canvas, 30, 10), 255);
}

#[test]
fn render_shares_cache_across_pages() {
    let root = ExtractRoot::new();
    root.write_unit_square_font();
    let page = crate::util::unit_square_page()[0].clone();
    root.write_pages(&serde_json::json!([page.clone(), page]));

    let mut renderer = Renderer::from_extract_root(root.path()).unwrap();
    let (first, _) = renderer.render_page(0).unwrap();
    let (second, _) = renderer.render_page(1).unwrap();
    // Round-trip stability: both pages come out bit-identical.
    assert_eq!(first.data(), second.data());
}

#[test]
fn render_unusable_font_skips_run_but_renders_page() {
    let root = ExtractRoot::new();
    root.write_json(
        "glyphs.json",
        &serde_json::json!([
            {"fontKey": "hollow", "glyphs": {"g": {"type": "text"}}},
        ]),
    );
    root.write_pages(&serde_json::json!([
        {
            "width": 30.0,
            "height": 10.0,
            "children": [
                {
                    "type": "run",
                    "fontKey": "hollow",
                    "glyphs": ["g"],
                    "xPosition": [0.0],
                },
            ],
        },
    ]));

    let mut renderer = Renderer::from_extract_root(root.path()).unwrap();
    let (canvas, stats) = renderer.render_page(0).unwrap();
    assert_eq!(stats.skipped_runs, 1);
    assert_eq!(stats.pasted_glyphs, 0);
    assert_eq!(luma(&canvas, 15, 5), 255);
}
