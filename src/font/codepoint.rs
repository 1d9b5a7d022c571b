//! UTF-8 code point decoding
//!
//! Decodes exactly one code point from the start of a byte slice using the
//! lead-byte length prefix. Continuation bytes are not validated; missing
//! bytes read as zero. Malformed input yields an unspecified value, never a panic.

/// Unicode scalar value as handed to the rasterizer
pub type CodePoint = u32;

/// Decode the first code point of `bytes`.
///
/// Empty input decodes to 0.
#[inline]
pub fn decode_codepoint(bytes: &[u8]) -> CodePoint {
    let byte = |i: usize| bytes.get(i).copied().unwrap_or(0) as u32;
    let lead = byte(0);

    if lead < 0x80 {
        lead
    } else if lead < 0xE0 {
        ((lead & 0x1F) << 6) | (byte(1) & 0x3F)
    } else if lead < 0xF0 {
        ((lead & 0x0F) << 12) | ((byte(1) & 0x3F) << 6) | (byte(2) & 0x3F)
    } else {
        ((lead & 0x07) << 18)
            | ((byte(1) & 0x3F) << 12)
            | ((byte(2) & 0x3F) << 6)
            | (byte(3) & 0x3F)
    }
}

/// Decode the first code point of a string slice
#[inline]
pub fn decode_str(s: &str) -> CodePoint {
    decode_codepoint(s.as_bytes())
}
