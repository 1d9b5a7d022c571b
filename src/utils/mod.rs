//! Utility functions shared across glyphcell
//!
//! Common helpers that don't fit in specialized modules.

pub mod color;

pub use color::{argb_channels, parse_hex_color, parse_hex_color_argb};
