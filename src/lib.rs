//! glyphcell - render single characters into fixed-size terminal cells
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  UTF-8 char  →  code point               │
//! │                    ↓                     │
//! │  Font chain (first covering face)        │
//! │                    ↓                     │
//! │  Rasterizer (freetype / fontdue)         │
//! │                    ↓  coverage bitmap    │
//! │  Compositor (fg/bg blend)                │
//! │                    ↓  ARGB bitmap        │
//! │  Cell fit (collapse, baseline, center)   │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ```no_run
//! use glyphcell::{render_cell, CellGeometry};
//!
//! let registry = glyphcell::init(&["/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf"], 16)?;
//! let cell = render_cell(&registry, "A", 0xFFFFFFFF, 0xFF000000, &CellGeometry::new(16, 20, 16))?;
//! assert_eq!(cell.height, 20);
//! glyphcell::teardown(registry);
//! # Ok::<(), glyphcell::RenderError>(())
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod font;
pub mod render;
pub mod utils;

pub use error::{FontLoadError, RenderError};
pub use font::{CodePoint, CoverageBitmap, FontEngine, FontRegistry, FontdueEngine, FreeTypeEngine};
pub use render::{
    placeholder_cell, render_cell, render_cell_into, render_codepoint, render_line, Cell,
    CellGeometry, CellRenderer, LineImage,
};

use std::path::Path;

/// Start FreeType and load the font chain.
///
/// Fails only if FreeType itself cannot start; unloadable fonts are skipped.
pub fn init<P: AsRef<Path>>(
    font_paths: &[P],
    pixel_height: u32,
) -> Result<FontRegistry<FreeTypeEngine>, RenderError> {
    let engine = FreeTypeEngine::new()?;
    Ok(FontRegistry::init(engine, font_paths, pixel_height))
}

/// Release the font chain, then its engine
pub fn teardown<E: FontEngine>(registry: FontRegistry<E>) {
    registry.teardown();
}
