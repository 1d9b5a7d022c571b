//! FreeType rasterizer
//!
//! Grayscale (non-subpixel) glyph rendering through freetype-rs.
//!
//! FreeType keeps glyph-slot scratch state inside each face and the library is
//! not thread-safe, so neither the engine nor its faces are `Send`. Build one
//! `FontRegistry<FreeTypeEngine>` per rendering thread.

use crate::constants::MAX_GLYPH_DIMENSION;
use crate::error::{FontLoadError, RenderError};
use crate::font::codepoint::CodePoint;
use crate::font::engine::{CoverageBitmap, FontEngine};
use freetype::face::LoadFlag;
use freetype::render_mode::RenderMode;
use freetype::Library;
use log::{debug, info, warn};
use std::path::Path;

/// FreeType face at a fixed pixel height
pub struct FtFace {
    face: freetype::Face,
}

/// Engine owning the FreeType library handle
///
/// Faces must be dropped before the engine; `FontRegistry` guarantees this.
pub struct FreeTypeEngine {
    library: Library,
}

impl FreeTypeEngine {
    /// Initialize the FreeType library
    pub fn new() -> Result<Self, RenderError> {
        let library = Library::init().map_err(|e| {
            RenderError::EngineInit(format!("FreeType initialization failed: {:?}", e))
        })?;
        info!("FreeType initialized");
        Ok(Self { library })
    }
}

impl Drop for FreeTypeEngine {
    fn drop(&mut self) {
        debug!("FreeType library released");
    }
}

impl FontEngine for FreeTypeEngine {
    type Face = FtFace;

    fn name(&self) -> &'static str {
        "freetype"
    }

    fn load_font(&self, path: &Path, pixel_height: u32) -> Result<FtFace, FontLoadError> {
        let face = self
            .library
            .new_face(path, 0)
            .map_err(|e| FontLoadError::Parse {
                path: path.to_path_buf(),
                reason: format!("{:?}", e),
            })?;

        face.set_pixel_sizes(0, pixel_height)
            .map_err(|e| FontLoadError::PixelSize {
                path: path.to_path_buf(),
                size: pixel_height,
                reason: format!("{:?}", e),
            })?;

        Ok(FtFace { face })
    }

    fn has_glyph(&self, face: &FtFace, cp: CodePoint) -> bool {
        // get_char_index returns 0 (or None) if not found
        matches!(face.face.get_char_index(cp as usize), Some(idx) if idx != 0)
    }

    fn rasterize(&self, face: &FtFace, cp: CodePoint) -> Option<CoverageBitmap> {
        let glyph_index = face.face.get_char_index(cp as usize)?;
        if glyph_index == 0 {
            return None;
        }

        if face.face.load_glyph(glyph_index, LoadFlag::DEFAULT).is_err() {
            debug!("FreeType: failed to load glyph U+{:04X}", cp);
            return None;
        }

        let glyph = face.face.glyph();
        if glyph.render_glyph(RenderMode::Normal).is_err() {
            debug!("FreeType: failed to render glyph U+{:04X}", cp);
            return None;
        }

        let bitmap = glyph.bitmap();
        let width = bitmap.width().max(0) as usize;
        let height = bitmap.rows().max(0) as usize;
        let baseline = glyph.bitmap_top();

        if width == 0 || height == 0 {
            // Empty glyph (e.g., space)
            return Some(CoverageBitmap::empty(baseline));
        }

        if width > MAX_GLYPH_DIMENSION || height > MAX_GLYPH_DIMENSION {
            warn!("FreeType: glyph too large ({}x{}), skipping", width, height);
            return None;
        }

        // Strip row padding (pitch >= width)
        let buffer = bitmap.buffer();
        let pitch = bitmap.pitch().unsigned_abs() as usize;
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            let start = y * pitch;
            data.extend_from_slice(buffer.get(start..start + width)?);
        }

        Some(CoverageBitmap {
            data,
            width,
            height,
            baseline,
        })
    }

    fn family_name(&self, face: &FtFace) -> Option<String> {
        face.face.family_name()
    }
}
