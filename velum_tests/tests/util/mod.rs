// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Payload fixtures shared across tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary extract directory populated with payload artifacts.
pub(crate) struct ExtractRoot {
    dir: TempDir,
}

impl ExtractRoot {
    pub(crate) fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp extract root"),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn output_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    pub(crate) fn write_json(&self, name: &str, value: &serde_json::Value) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    /// Writes `glyphs.json` with one font `F1` whose only glyph `g1` is
    /// a 10x10 design-unit square with advance 10, at pixel height 20.
    pub(crate) fn write_unit_square_font(&self) {
        self.write_json("glyphs.json", &unit_square_font());
    }

    /// Writes a versioned page-data artifact with the given pages.
    pub(crate) fn write_pages(&self, pages: &serde_json::Value) {
        self.write_json("page_data_0_5.json", pages);
    }
}

/// The end-to-end scenario font: `F1` / `g1`, unit square outline,
/// `advanceWidth` 10, `height` 20, which yields metrics
/// `(min_y=0, max_y=10, height_px=20)` and scale 2.0.
pub(crate) fn unit_square_font() -> serde_json::Value {
    serde_json::json!([
        {
            "fontKey": "F1",
            "height": 20.0,
            "glyphs": {
                "g1": {
                    "type": "path",
                    "path": "M 0 0 L 10 0 L 10 10 L 0 10 Z",
                    "advanceWidth": 10.0,
                },
            },
        },
    ])
}

/// One page, 50x20, with a single run placing `g1` at x=5.
pub(crate) fn unit_square_page() -> serde_json::Value {
    serde_json::json!([
        {
            "width": 50.0,
            "height": 20.0,
            "startPosition": 100.0,
            "endPosition": 200.0,
            "children": [
                {
                    "type": "run",
                    "fontKey": "F1",
                    "glyphs": ["g1"],
                    "xPosition": [5.0],
                    "transform": [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
                    "fontSize": 20.0,
                },
            ],
        },
    ])
}

/// Grayscale value of one canvas pixel (255 white, 0 black).
pub(crate) fn luma(canvas: &tiny_skia::Pixmap, x: u32, y: u32) -> u8 {
    canvas.pixels()[(y * canvas.width() + x) as usize].red()
}
