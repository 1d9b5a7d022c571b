//! Glyph-to-cell rendering
//!
//! Pipeline: code point → font chain → coverage bitmap → colored bitmap → cell.
//! Every call owns its intermediate buffers; nothing persists between calls.

pub mod cell;
pub mod compositor;
pub mod line;
pub mod pipeline;
pub mod placeholder;

pub use cell::{Cell, CellGeometry};
pub use compositor::ColorBitmap;
pub use line::{render_line, LineImage};
pub use pipeline::{render_cell, render_cell_into, render_codepoint, CellRenderer};
pub use placeholder::placeholder_cell;

use crate::error::RenderError;

/// Empty pixel vector with room for `width * height` pixels
pub(crate) fn alloc_pixels(width: usize, height: usize) -> Result<Vec<u32>, RenderError> {
    let err = || RenderError::Allocation { width, height };
    let len = width.checked_mul(height).ok_or_else(err)?;
    let mut pixels = Vec::new();
    pixels.try_reserve_exact(len).map_err(|_| err())?;
    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_overflow_is_reported() {
        assert_eq!(
            alloc_pixels(usize::MAX, 2),
            Err(RenderError::Allocation {
                width: usize::MAX,
                height: 2
            })
        );
    }

    #[test]
    fn test_alloc_capacity() {
        let pixels = alloc_pixels(8, 4).unwrap();
        assert!(pixels.is_empty());
        assert!(pixels.capacity() >= 32);
    }
}
