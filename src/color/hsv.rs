//! HSV to RGB conversion strategies
//!
//! Two algorithms are available and they are not bit-identical:
//! - [`HsvConversion::Float`]: six-section piecewise hue wheel evaluated in
//!   single precision. Smooth, but slow on cores without an FPU.
//! - [`HsvConversion::Spectrum`]: fixed-point conversion from `smart-leds`.

pub use smart_leds::hsv::hsv2rgb as hsv2rgb_spectrum;

use crate::color::{Hsv, Rgb};

/// Selects the algorithm used by HSV writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HsvConversion {
    /// Floating-point piecewise conversion (default for every family)
    #[default]
    Float,
    /// Fixed-point spectrum conversion
    Spectrum,
}

impl HsvConversion {
    /// Convert a color with the selected algorithm
    #[inline]
    pub fn convert(self, hsv: Hsv) -> Rgb {
        match self {
            Self::Float => hsv2rgb_float(hsv),
            Self::Spectrum => hsv2rgb_spectrum(hsv),
        }
    }
}

/// Convert HSV to RGB on a six-section hue wheel (all channels are 0-255)
///
/// No gamma or brightness is applied here.
#[allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn hsv2rgb_float(hsv: Hsv) -> Rgb {
    let Hsv { hue, sat, val } = hsv;
    if sat == 0 {
        return Rgb::new(val, val, val);
    }

    let h = f32::from(hue) / 255.0;
    let s = f32::from(sat) / 255.0;
    let v = f32::from(val) / 255.0;

    let sector = libm::floorf(h * 6.0);
    let f = h * 6.0 - sector;
    let p = (v * (1.0 - s) * 255.0) as u8;
    let q = (v * (1.0 - f * s) * 255.0) as u8;
    let t = (v * (1.0 - (1.0 - f) * s) * 255.0) as u8;

    match (sector as u8) % 6 {
        0 => Rgb::new(val, t, p),
        1 => Rgb::new(q, val, p),
        2 => Rgb::new(p, val, t),
        3 => Rgb::new(p, q, val),
        4 => Rgb::new(t, p, val),
        _ => Rgb::new(val, p, q),
    }
}
