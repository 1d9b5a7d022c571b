//! fontdue rasterizer
//!
//! Pure-Rust alternative to FreeType. fontdue faces are immutable and
//! `Send + Sync`, so a `FontRegistry<FontdueEngine>` can be shared across
//! render threads behind an `Arc`.

use crate::constants::MAX_GLYPH_DIMENSION;
use crate::error::FontLoadError;
use crate::font::codepoint::CodePoint;
use crate::font::engine::{CoverageBitmap, FontEngine};
use fontdue::{Font, FontSettings};
use log::warn;
use std::path::Path;

/// fontdue face with its fixed pixel height
pub struct FdFace {
    font: Font,
    size_px: f32,
}

/// Stateless fontdue engine
#[derive(Debug, Default, Clone, Copy)]
pub struct FontdueEngine;

impl FontdueEngine {
    pub fn new() -> Self {
        Self
    }
}

impl FontEngine for FontdueEngine {
    type Face = FdFace;

    fn name(&self) -> &'static str {
        "fontdue"
    }

    fn load_font(&self, path: &Path, pixel_height: u32) -> Result<FdFace, FontLoadError> {
        let data = std::fs::read(path).map_err(|source| FontLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = FontSettings {
            scale: pixel_height as f32,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(data, settings).map_err(|e| FontLoadError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(FdFace {
            font,
            size_px: pixel_height as f32,
        })
    }

    fn has_glyph(&self, face: &FdFace, cp: CodePoint) -> bool {
        match char::from_u32(cp) {
            Some(ch) => face.font.lookup_glyph_index(ch) != 0,
            None => false,
        }
    }

    fn rasterize(&self, face: &FdFace, cp: CodePoint) -> Option<CoverageBitmap> {
        let ch = char::from_u32(cp)?;
        let index = face.font.lookup_glyph_index(ch);
        if index == 0 {
            return None;
        }

        let (metrics, data) = face.font.rasterize_indexed(index, face.size_px);
        // ymin is the bottom edge relative to the baseline (negative for descenders)
        let baseline = metrics.ymin + metrics.height as i32;

        if metrics.width == 0 || metrics.height == 0 {
            return Some(CoverageBitmap::empty(baseline));
        }

        if metrics.width > MAX_GLYPH_DIMENSION || metrics.height > MAX_GLYPH_DIMENSION {
            warn!(
                "fontdue: glyph too large ({}x{}), skipping",
                metrics.width, metrics.height
            );
            return None;
        }

        Some(CoverageBitmap {
            data,
            width: metrics.width,
            height: metrics.height,
            baseline,
        })
    }
}
