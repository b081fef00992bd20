use crate::color::{Hsv, Rgb};

/// Convert RGB to HSV (all channels are 0-255).
///
/// Hue is represented on a 0-255 circle, matching `smart_leds::hsv::Hsv`.
#[allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn rgb2hsv(rgb: Rgb) -> Hsv {
    let r = rgb.r;
    let g = rgb.g;
    let b = rgb.b;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max.wrapping_sub(min);

    let val = max;

    let sat = if max == 0 {
        0
    } else {
        ((u16::from(delta) * 255) / u16::from(max)) as u8
    };

    // 0, 85 and 171 are the red, green and blue sector offsets
    let hue = if delta == 0 {
        0
    } else if max == r {
        wrap_hue(0, g, b, delta)
    } else if max == g {
        wrap_hue(85, b, r, delta)
    } else {
        wrap_hue(171, r, g, delta)
    };

    Hsv { hue, sat, val }
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn wrap_hue(offset: i16, rising: u8, falling: u8, delta: u8) -> u8 {
    let h = offset + (43i16 * (i16::from(rising) - i16::from(falling))) / i16::from(delta);
    if h < 0 { (h + 256) as u8 } else { h as u8 }
}
