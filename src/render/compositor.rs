//! Alpha compositing of coverage bitmaps
//!
//! Blends foreground over background through 8-bit coverage using integer
//! lane arithmetic: red and blue are processed together in one u32, green on
//! its own, so no lane ever carries into its neighbor.
//!
//! The blend is `bg + (fg - bg) * a / 256`, floored per channel. It is computed
//! as `(fg * a + bg * (256 - a)) >> 8`, which is the same value without a
//! signed intermediate. Coverage 0 and 255 pass the colors through verbatim.

use crate::constants::{ALPHA_OPAQUE, G_MASK, RB_MASK};
use crate::error::RenderError;
use crate::font::engine::CoverageBitmap;
use crate::render::alloc_pixels;

/// 32-bit ARGB bitmap, row-major, stride = width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBitmap {
    pub pixels: Vec<u32>,
    pub width: usize,
    pub height: usize,
}

impl ColorBitmap {
    /// Row `y` as a slice
    #[inline]
    pub fn row(&self, y: usize) -> &[u32] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }
}

/// Blend one pixel
#[inline]
pub fn blend(fg: u32, bg: u32, alpha: u8) -> u32 {
    match alpha {
        0 => bg,
        255 => fg,
        a => {
            let a = a as u32;
            let inv = 256 - a;
            // Each lane holds at most 255 * 256 before the shift
            let rb = ((fg & RB_MASK) * a + (bg & RB_MASK) * inv) >> 8;
            let g = ((fg & G_MASK) * a + (bg & G_MASK) * inv) >> 8;
            (rb & RB_MASK) | (g & G_MASK) | ALPHA_OPAQUE
        }
    }
}

/// Colorize a coverage bitmap
pub fn composite(glyph: &CoverageBitmap, fg: u32, bg: u32) -> Result<ColorBitmap, RenderError> {
    let mut pixels = alloc_pixels(glyph.width, glyph.height)?;
    pixels.extend(glyph.data.iter().map(|&a| blend(fg, bg, a)));

    Ok(ColorBitmap {
        pixels,
        width: glyph.width,
        height: glyph.height,
    })
}
