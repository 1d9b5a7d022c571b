//! Single-character render pipeline
//!
//! `render_cell` is a pure function of its arguments and the registry:
//! decode, resolve, rasterize, colorize, fit. The coverage and color bitmaps
//! live only for the duration of the call.

use crate::error::RenderError;
use crate::font::codepoint::{decode_str, CodePoint};
use crate::font::engine::FontEngine;
use crate::font::glyph::rasterize_glyph;
use crate::font::registry::FontRegistry;
use crate::render::cell::{fit_cell, fit_into, Cell, CellGeometry};
use crate::render::compositor::{composite, ColorBitmap};
use crate::render::line::{render_line, LineImage};

/// Render session bound to one registry
///
/// Borrows the registry, so the registry cannot be torn down while a renderer
/// is alive. Holds no other state; any number of renderers may share a
/// registry.
pub struct CellRenderer<'a, E: FontEngine> {
    registry: &'a FontRegistry<E>,
}

impl<'a, E: FontEngine> CellRenderer<'a, E> {
    pub fn new(registry: &'a FontRegistry<E>) -> Self {
        Self { registry }
    }

    /// Registry this renderer draws from
    pub fn registry(&self) -> &'a FontRegistry<E> {
        self.registry
    }

    /// See [`render_cell`]
    pub fn render_cell(
        &self,
        utf8: &str,
        fg: u32,
        bg: u32,
        geometry: &CellGeometry,
    ) -> Result<Cell, RenderError> {
        render_cell(self.registry, utf8, fg, bg, geometry)
    }

    /// See [`render_codepoint`]
    pub fn render_codepoint(
        &self,
        cp: CodePoint,
        fg: u32,
        bg: u32,
        geometry: &CellGeometry,
    ) -> Result<Cell, RenderError> {
        render_codepoint(self.registry, cp, fg, bg, geometry)
    }

    /// See [`render_cell_into`]
    pub fn render_cell_into(
        &self,
        utf8: &str,
        fg: u32,
        bg: u32,
        geometry: &CellGeometry,
        dst: &mut [u32],
    ) -> Result<usize, RenderError> {
        render_cell_into(self.registry, utf8, fg, bg, geometry, dst)
    }

    /// See [`render_line`]
    pub fn render_line(
        &self,
        text: &str,
        fg: u32,
        bg: u32,
        geometry: &CellGeometry,
    ) -> Result<LineImage, RenderError> {
        render_line(self.registry, text, fg, bg, geometry)
    }
}

impl<E: FontEngine> Clone for CellRenderer<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: FontEngine> Copy for CellRenderer<'_, E> {}

/// Render the first character of `utf8` into a new cell.
///
/// The returned cell's width is the effective width (half of
/// `geometry.width` for narrow glyphs).
pub fn render_cell<E: FontEngine>(
    registry: &FontRegistry<E>,
    utf8: &str,
    fg: u32,
    bg: u32,
    geometry: &CellGeometry,
) -> Result<Cell, RenderError> {
    render_codepoint(registry, decode_str(utf8), fg, bg, geometry)
}

/// Render an already decoded code point into a new cell
pub fn render_codepoint<E: FontEngine>(
    registry: &FontRegistry<E>,
    cp: CodePoint,
    fg: u32,
    bg: u32,
    geometry: &CellGeometry,
) -> Result<Cell, RenderError> {
    geometry.validate()?;
    let (colored, baseline) = colorize(registry, cp, fg, bg)?;
    fit_cell(&colored, baseline, geometry, bg)
}

/// Render the first character of `utf8` into a caller-allocated buffer.
///
/// `dst` must hold at least `geometry.width * geometry.height` pixels; rows are
/// written at stride = effective width, which is returned. On error `dst` is
/// not modified.
pub fn render_cell_into<E: FontEngine>(
    registry: &FontRegistry<E>,
    utf8: &str,
    fg: u32,
    bg: u32,
    geometry: &CellGeometry,
    dst: &mut [u32],
) -> Result<usize, RenderError> {
    geometry.validate()?;
    let needed = geometry
        .width
        .checked_mul(geometry.height)
        .ok_or(RenderError::Allocation {
            width: geometry.width,
            height: geometry.height,
        })?;
    if dst.len() < needed {
        return Err(RenderError::BufferTooSmall {
            needed,
            got: dst.len(),
        });
    }

    let (colored, baseline) = colorize(registry, decode_str(utf8), fg, bg)?;
    fit_into(&colored, baseline, geometry, bg, dst)
}

/// Rasterize and blend; returns the colored glyph and its baseline offset
fn colorize<E: FontEngine>(
    registry: &FontRegistry<E>,
    cp: CodePoint,
    fg: u32,
    bg: u32,
) -> Result<(ColorBitmap, i32), RenderError> {
    let glyph = rasterize_glyph(registry, cp)?;
    let colored = composite(&glyph, fg, bg)?;
    Ok((colored, glyph.baseline))
}
