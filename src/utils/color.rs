//! Color parsing utilities
//!
//! Colors are packed 0xAARRGGBB values throughout the crate.

use crate::constants::ALPHA_OPAQUE;

/// Parse 6-digit hex color (e.g., "ff0000" -> (255, 0, 0))
/// Also supports 3-digit short format (e.g., "f00" -> (255, 0, 0))
/// Returns None on invalid input.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            // Short format: expand F -> FF
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse a hex color into packed ARGB.
///
/// Accepts `RRGGBB`, `RGB` (alpha forced to 0xFF) and `AARRGGBB`,
/// each with an optional leading `#` or `0x`.
pub fn parse_hex_color_argb(hex: &str) -> Option<u32> {
    let trimmed = hex.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits = trimmed.trim_start_matches('#');

    if digits.len() == 8 && digits.is_ascii() {
        return u32::from_str_radix(digits, 16).ok();
    }

    let (r, g, b) = parse_hex_color(digits)?;
    Some(ALPHA_OPAQUE | (r as u32) << 16 | (g as u32) << 8 | b as u32)
}

/// Split packed ARGB into (a, r, g, b)
#[inline]
pub fn argb_channels(color: u32) -> (u8, u8, u8, u8) {
    (
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    )
}
