//! Rasterizer engine boundary
//!
//! The font layer consumes a rasterizer through `FontEngine`:
//! load a face at a fixed pixel height, ask whether it maps a code point,
//! and render one glyph to an 8-bit coverage bitmap.
//! Faces and the engine are released by `Drop`.

use crate::error::FontLoadError;
use crate::font::codepoint::CodePoint;
use std::path::Path;

/// Grayscale rasterization of one glyph
///
/// Row-major, one byte of coverage per pixel, no padding between rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageBitmap {
    /// Coverage values (0 = transparent, 255 = opaque)
    pub data: Vec<u8>,
    /// Bitmap width (pixels)
    pub width: usize,
    /// Bitmap height (pixels)
    pub height: usize,
    /// Distance from the top row down to the font baseline
    pub baseline: i32,
}

impl CoverageBitmap {
    /// Empty glyph (e.g., space) with the given baseline
    pub fn empty(baseline: i32) -> Self {
        Self {
            data: Vec::new(),
            width: 0,
            height: 0,
            baseline,
        }
    }
}

/// Font rasterization backend
pub trait FontEngine {
    /// Loaded font face at a fixed pixel height
    type Face;

    /// Short engine name for logs
    fn name(&self) -> &'static str;

    /// Load a font file and fix its pixel height
    fn load_font(&self, path: &Path, pixel_height: u32) -> Result<Self::Face, FontLoadError>;

    /// Whether the face's character map covers `cp`
    fn has_glyph(&self, face: &Self::Face, cp: CodePoint) -> bool;

    /// Render `cp` with grayscale anti-aliasing.
    ///
    /// Returns None when the face has no outline for the glyph or rendering fails.
    fn rasterize(&self, face: &Self::Face, cp: CodePoint) -> Option<CoverageBitmap>;

    /// Human-readable family name of a face, if known
    fn family_name(&self, _face: &Self::Face) -> Option<String> {
        None
    }
}
