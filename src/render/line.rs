//! Line strips
//!
//! Renders a run of characters side by side, advancing the cursor by each
//! cell's effective width. Characters no font can render get a half-width
//! placeholder box.

use crate::error::RenderError;
use crate::font::engine::FontEngine;
use crate::font::registry::FontRegistry;
use crate::render::alloc_pixels;
use crate::render::cell::{argb_to_rgba, Cell, CellGeometry};
use crate::render::pipeline::render_codepoint;
use crate::render::placeholder::placeholder_cell;
use log::debug;

/// Horizontal strip of rendered cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineImage {
    pub pixels: Vec<u32>,
    pub width: usize,
    pub height: usize,
    /// Effective width of each character, in input order
    pub advances: Vec<usize>,
}

impl LineImage {
    /// Convert to RGBA8 bytes (PNG order)
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        argb_to_rgba(&self.pixels)
    }
}

/// Render every char of `text` into one strip of `geometry.height` rows
pub fn render_line<E: FontEngine>(
    registry: &FontRegistry<E>,
    text: &str,
    fg: u32,
    bg: u32,
    geometry: &CellGeometry,
) -> Result<LineImage, RenderError> {
    geometry.validate()?;

    let mut cells: Vec<Cell> = Vec::with_capacity(text.chars().count());
    for ch in text.chars() {
        let cell = match render_codepoint(registry, ch as u32, fg, bg, geometry) {
            Ok(cell) => cell,
            Err(RenderError::GlyphNotFound(cp)) => {
                debug!("U+{:04X}: drawing placeholder", cp);
                placeholder_cell(fg, bg, (geometry.width / 2).max(1), geometry.height)?
            }
            Err(e) => return Err(e),
        };
        cells.push(cell);
    }

    let width: usize = cells.iter().map(|c| c.width).sum();
    let height = geometry.height;
    let mut pixels = alloc_pixels(width, height)?;
    for y in 0..height {
        for cell in &cells {
            pixels.extend_from_slice(cell.row(y));
        }
    }

    Ok(LineImage {
        pixels,
        width,
        height,
        advances: cells.iter().map(|c| c.width).collect(),
    })
}
