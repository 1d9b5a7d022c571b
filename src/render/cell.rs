//! Cell normalization
//!
//! Places a colored glyph bitmap into a fixed `width x height` cell:
//! - narrow glyphs collapse the cell to half width
//! - the glyph baseline is aligned to the cell baseline (never shifted up)
//! - the glyph is centered horizontally; wider glyphs are cropped evenly
//! - everything outside the glyph is background
//!
//! All addressing is `row * stride + col` into bounds-checked slices.
//! Glyph rows that fall below the cell are dropped.

use crate::error::RenderError;
use crate::render::alloc_pixels;
use crate::render::compositor::ColorBitmap;

/// Output cell geometry, fixed for a rendering session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    /// Requested (maximum) cell width in pixels
    pub width: usize,
    /// Cell height in pixels
    pub height: usize,
    /// Baseline row, counted from the top
    pub baseline: i32,
}

impl CellGeometry {
    pub fn new(width: usize, height: usize, baseline: i32) -> Self {
        Self {
            width,
            height,
            baseline,
        }
    }

    /// Reject zero-sized cells
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidGeometry {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Cell width used for a glyph `src_width` pixels wide
    #[inline]
    pub fn effective_width(&self, src_width: usize) -> usize {
        effective_width(src_width, self.width)
    }

}

/// Halve the cell when the glyph is narrower than two thirds of it
#[inline]
pub fn effective_width(src_width: usize, out_width: usize) -> usize {
    // Widened so extreme widths cannot overflow
    if 3 * (src_width as u128) < 2 * out_width as u128 {
        out_width / 2
    } else {
        out_width
    }
}

/// Rendered cell: ARGB pixels, row-major, stride = width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub pixels: Vec<u32>,
    /// Effective width (may be half the requested width)
    pub width: usize,
    pub height: usize,
}

impl Cell {
    /// Row `y` as a slice
    #[inline]
    pub fn row(&self, y: usize) -> &[u32] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Pixel at (x, y)
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

/// Convert packed ARGB pixels to RGBA8 bytes
pub fn argb_to_rgba(pixels: &[u32]) -> Vec<u8> {
    pixels
        .iter()
        .flat_map(|&p| {
            let [a, r, g, b] = p.to_be_bytes();
            [r, g, b, a]
        })
        .collect()
}

/// Horizontal placement of one glyph row inside the cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    /// First source column copied
    src_x: usize,
    /// First destination column written
    dst_x: usize,
    /// Columns copied
    len: usize,
}

/// Center `src_width` inside `cell_width`, cropping evenly when it does not fit.
/// An odd excess leaves the extra column on the right side.
fn horizontal_span(src_width: usize, cell_width: usize) -> Span {
    if src_width <= cell_width {
        Span {
            src_x: 0,
            dst_x: (cell_width - src_width) / 2,
            len: src_width,
        }
    } else {
        Span {
            src_x: (src_width - cell_width) / 2,
            dst_x: 0,
            len: cell_width,
        }
    }
}

/// Write `src` into the caller's buffer `dst`.
///
/// Returns the effective width; `dst` holds `effective_width * geometry.height`
/// pixels at stride `effective_width`. Pixels past that are left untouched.
/// Nothing is written when `dst` is too small.
pub fn fit_into(
    src: &ColorBitmap,
    glyph_baseline: i32,
    geometry: &CellGeometry,
    bg: u32,
    dst: &mut [u32],
) -> Result<usize, RenderError> {
    geometry.validate()?;

    let width = geometry.effective_width(src.width);
    let height = geometry.height;
    let needed = width
        .checked_mul(height)
        .ok_or(RenderError::Allocation { width, height })?;
    if dst.len() < needed {
        return Err(RenderError::BufferTooSmall {
            needed,
            got: dst.len(),
        });
    }

    let dst = &mut dst[..needed];
    dst.fill(bg);

    // Glyph baseline below the cell baseline: keep the top row at 0
    let y_off = geometry.baseline.saturating_sub(glyph_baseline).max(0) as usize;
    let span = horizontal_span(src.width, width);

    for y in 0..src.height {
        let dy = y + y_off;
        if dy >= height {
            break;
        }
        let src_row = &src.row(y)[span.src_x..span.src_x + span.len];
        let start = dy * width + span.dst_x;
        dst[start..start + span.len].copy_from_slice(src_row);
    }

    Ok(width)
}

/// Fit `src` into a freshly allocated cell
pub fn fit_cell(
    src: &ColorBitmap,
    glyph_baseline: i32,
    geometry: &CellGeometry,
    bg: u32,
) -> Result<Cell, RenderError> {
    geometry.validate()?;

    let width = geometry.effective_width(src.width);
    let mut pixels = alloc_pixels(width, geometry.height)?;
    pixels.resize(width * geometry.height, bg);
    fit_into(src, glyph_baseline, geometry, bg, &mut pixels)?;

    Ok(Cell {
        pixels,
        width,
        height: geometry.height,
    })
}
