//! Font loading and glyph rasterization
//!
//! Handles:
//! - UTF-8 code point decoding
//! - Font fallback chain (load order decides coverage)
//! - Grayscale rasterization (freetype / fontdue)
//! - System font discovery (fontconfig)

pub mod codepoint;
pub mod engine;
pub mod fontconfig;
pub mod fontdue_engine;
pub mod freetype_engine;
pub mod glyph;
pub mod registry;

pub use codepoint::{decode_codepoint, decode_str, CodePoint};
pub use engine::{CoverageBitmap, FontEngine};
pub use fontdue_engine::FontdueEngine;
pub use freetype_engine::FreeTypeEngine;
pub use glyph::rasterize_glyph;
pub use registry::{FontRegistry, LoadedFont};
