//! Glyph rasterization for a resolved code point
//!
//! Joins chain resolution and engine rendering. Both "no font covers it" and
//! "the covering font cannot render it" surface as `GlyphNotFound`.
//! Nothing is cached; every call re-rasterizes.

use crate::error::RenderError;
use crate::font::codepoint::CodePoint;
use crate::font::engine::{CoverageBitmap, FontEngine};
use crate::font::registry::FontRegistry;
use log::{debug, warn};

/// Resolve `cp` through the chain and render it to a coverage bitmap
pub fn rasterize_glyph<E: FontEngine>(
    registry: &FontRegistry<E>,
    cp: CodePoint,
) -> Result<CoverageBitmap, RenderError> {
    let font = registry
        .resolve(cp)
        .ok_or(RenderError::GlyphNotFound(cp))?;

    let glyph = registry
        .engine()
        .rasterize(&font.face, cp)
        .ok_or(RenderError::GlyphNotFound(cp))?;

    if glyph.data.len() != glyph.width * glyph.height {
        warn!(
            "{}: U+{:04X} bitmap has {} bytes for {}x{}",
            registry.engine().name(),
            cp,
            glyph.data.len(),
            glyph.width,
            glyph.height
        );
        return Err(RenderError::GlyphNotFound(cp));
    }

    debug!(
        "U+{:04X}: {}x{} baseline={} (font #{})",
        cp, glyph.width, glyph.height, glyph.baseline, font.index
    );
    Ok(glyph)
}
