/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
/// A factor of 255 leaves the value untouched.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Dim an 8-bit value by a global brightness level
///
/// The value is divided by `256 / (level + 1)` with truncating integer
/// division, so the response is stepped rather than linear:
/// levels 128..=255 leave the value untouched, 127 halves it and level 0
/// yields zero.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn dim8(value: u8, level: u8) -> u8 {
    let divisor = 256 / (level as u16 + 1);
    (value as u16 / divisor) as u8
}
