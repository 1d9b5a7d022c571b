//! Global constants for glyphcell
//!
//! Consolidates cell geometry, color, and rasterizer limits
//! to eliminate magic numbers throughout the codebase.

// ============================================================================
// Cell Geometry Defaults
// ============================================================================

/// Width of one grid column in pixels
pub const COLUMN_WIDTH: usize = 24;

/// Default requested cell width: a double-width slot (CJK-sized)
/// Narrow glyphs collapse to a single column
pub const DEFAULT_CELL_WIDTH: usize = COLUMN_WIDTH * 2;

/// Default cell height in pixels
pub const DEFAULT_CELL_HEIGHT: usize = 40;

/// Default baseline row (distance from cell top)
pub const DEFAULT_CELL_BASELINE: i32 = 34;

/// Default font pixel height
pub const DEFAULT_PIXEL_HEIGHT: u32 = 40;

// ============================================================================
// Font Size Limits
// ============================================================================

/// Minimum font pixel height
pub const MIN_PIXEL_HEIGHT: u32 = 4;

/// Maximum font pixel height
pub const MAX_PIXEL_HEIGHT: u32 = 512;

/// Largest glyph bitmap edge accepted from a rasterizer
/// Prevents integer overflow and OOM from malformed fonts
pub const MAX_GLYPH_DIMENSION: usize = 4096;

// ============================================================================
// Color Constants (0xAARRGGBB)
// ============================================================================

/// Fully opaque alpha channel
pub const ALPHA_OPAQUE: u32 = 0xFF00_0000;

/// Red and blue lanes of a packed ARGB value
pub const RB_MASK: u32 = 0x00FF_00FF;

/// Green lane of a packed ARGB value
pub const G_MASK: u32 = 0x0000_FF00;

/// Default foreground (white)
pub const DEFAULT_FOREGROUND: u32 = 0xFFFF_FFFF;

/// Default background (black)
pub const DEFAULT_BACKGROUND: u32 = 0xFF00_0000;
