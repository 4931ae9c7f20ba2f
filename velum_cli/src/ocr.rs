// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text recognition over rendered pages.
//!
//! OCR is an external collaborator: the `tesseract` binary is invoked
//! per page when present. Recognition failures are never fatal; a page
//! without text simply contributes nothing to the combined output.

use std::path::Path;
use std::process::Command;

/// Name of the OCR binary looked up on `PATH`.
const OCR_BINARY: &str = "tesseract";

/// Returns whether the OCR binary is available.
pub(crate) fn ocr_available() -> bool {
    Command::new(OCR_BINARY)
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// Runs OCR over one rendered page PNG.
///
/// Returns the recognized text, or `None` when the binary is missing,
/// exits non-zero, or recognizes nothing.
pub(crate) fn run_ocr(png_path: &Path) -> Option<String> {
    let output = Command::new(OCR_BINARY)
        .arg(png_path)
        .arg("stdout")
        .args(["-l", "eng"])
        .output();
    let output = match output {
        Ok(output) => output,
        Err(err) => {
            log::warn!("ocr invocation failed for {}: {err}", png_path.display());
            return None;
        }
    };
    if !output.status.success() {
        log::warn!(
            "ocr exited with {} for {}",
            output.status,
            png_path.display()
        );
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    (!text.is_empty()).then_some(text)
}
