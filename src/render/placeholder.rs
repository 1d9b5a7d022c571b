//! Placeholder box for characters no font can render

use crate::error::RenderError;
use crate::render::alloc_pixels;
use crate::render::cell::Cell;

/// Hollow 1-px rectangle inset one pixel from the cell edge.
///
/// Cells smaller than 3x3 have no room for the box and stay background.
pub fn placeholder_cell(
    fg: u32,
    bg: u32,
    width: usize,
    height: usize,
) -> Result<Cell, RenderError> {
    let mut pixels = alloc_pixels(width, height)?;
    pixels.resize(width * height, bg);

    if width >= 3 && height >= 3 {
        let (left, right) = (1, width - 2);
        let (top, bottom) = (1, height - 2);
        for x in left..=right {
            pixels[top * width + x] = fg;
            pixels[bottom * width + x] = fg;
        }
        for y in top..=bottom {
            pixels[y * width + left] = fg;
            pixels[y * width + right] = fg;
        }
    }

    Ok(Cell {
        pixels,
        width,
        height,
    })
}
