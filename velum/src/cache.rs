// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoization of rasterized glyphs.

use crate::error::Error;
use crate::raster::GlyphRender;

/// Cache key for one rasterized glyph.
///
/// The font size is quantized to thousandths of a pixel so that
/// floating-point noise in repeated sizes cannot fragment the key space.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RenderKey {
    /// Font the render belongs to.
    pub font_key: String,
    /// Glyph identifier within the font.
    pub glyph_id: String,
    /// Font size in milli-pixels, rounded.
    pub size_millis: i64,
}

/// Quantizes a font size to the cache key granularity.
pub fn quantize_size(font_size: f64) -> i64 {
    (font_size * 1000.0).round() as i64
}

struct Entry {
    epoch: u64,
    key: RenderKey,
    render: GlyphRender,
}

/// A bounded, least-recently-used cache of glyph renders.
///
/// Entries are pure functions of their key, so the cache may be shared
/// across pages and runs as long as the underlying font data does not
/// change. Lookup is a linear scan with epoch-based eviction; the
/// working set of a book page is small enough that this beats hashing.
pub struct GlyphCache {
    entries: Vec<Entry>,
    epoch: u64,
    max_entries: usize,
}

/// Default capacity, sized for a typical book's glyph working set.
const DEFAULT_MAX_ENTRIES: usize = 256;

impl Default for GlyphCache {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphCache {
    /// Creates a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// Creates a cache bounded to `max_entries` renders.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            epoch: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Number of cached renders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cached render for `(font_key, glyph_id, font_size)`,
    /// invoking `render` and storing its result on a miss. Render
    /// failures propagate and are not cached.
    pub fn get_or_render<F>(
        &mut self,
        font_key: &str,
        glyph_id: &str,
        font_size: f64,
        render: F,
    ) -> Result<&GlyphRender, Error>
    where
        F: FnOnce() -> Result<GlyphRender, Error>,
    {
        let size_millis = quantize_size(font_size);
        let mut hit = None;
        let mut lowest_epoch = self.epoch;
        let mut lowest_index = 0;
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.key.size_millis == size_millis
                && entry.key.glyph_id == glyph_id
                && entry.key.font_key == font_key
            {
                hit = Some(index);
                break;
            }
            if entry.epoch < lowest_epoch {
                lowest_epoch = entry.epoch;
                lowest_index = index;
            }
        }

        self.epoch += 1;
        if let Some(index) = hit {
            let entry = &mut self.entries[index];
            entry.epoch = self.epoch;
            return Ok(&entry.render);
        }

        let entry = Entry {
            epoch: self.epoch,
            key: RenderKey {
                font_key: font_key.to_owned(),
                glyph_id: glyph_id.to_owned(),
                size_millis,
            },
            render: render()?,
        };
        let index = if self.entries.len() < self.max_entries {
            self.entries.push(entry);
            self.entries.len() - 1
        } else {
            self.entries[lowest_index] = entry;
            lowest_index
        };
        Ok(&self.entries[index].render)
    }
}

impl std::fmt::Debug for GlyphCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphCache")
            .field("len", &self.entries.len())
            .field("epoch", &self.epoch)
            .field("max_entries", &self.max_entries)
            .finish()
    }
}
