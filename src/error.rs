//! Error types
//!
//! Per-call render failures are returned as `RenderError`.
//! Per-font load failures are `FontLoadError`; the registry logs them and moves on.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single render call or of pipeline initialization
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The rasterizer engine could not be started; nothing can be rendered
    #[error("font engine initialization failed: {0}")]
    EngineInit(String),

    /// No font in the chain covers the code point, or the covering font has no usable outline
    #[error("no renderable glyph for U+{0:04X}")]
    GlyphNotFound(u32),

    /// Pixel buffer could not be allocated
    #[error("failed to allocate {width}x{height} pixel buffer")]
    Allocation { width: usize, height: usize },

    /// Caller-supplied buffer is shorter than the cell
    #[error("output buffer too small: need {needed} pixels, got {got}")]
    BufferTooSmall { needed: usize, got: usize },

    /// Cell width or height is zero
    #[error("invalid cell geometry {width}x{height}")]
    InvalidGeometry { width: usize, height: usize },
}

/// Failure to load one font of the fallback chain
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("font not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("failed to set pixel size {size}px on {path}: {reason}")]
    PixelSize {
        path: PathBuf,
        size: u32,
        reason: String,
    },
}
