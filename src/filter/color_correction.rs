//! Color correction filter
//!
//! Applies multiplicative scaling to each RGB channel. The LED gamma preset
//! only pulls green and blue down, matching the phosphor response of
//! common 5050 packages.

use crate::color::Rgb;
use crate::math8::scale8;

use super::Filter;

/// Factors that leave every channel untouched
pub const NEUTRAL_FACTORS: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Gamma preset for WS281x / SK6812 strips
///
/// Applied with [`scale8`], which treats 255 as exactly 1.0. Green at full
/// scale stores 176 rather than the 175 a plain `(x * s) >> 8` product gives.
pub const LED_GAMMA_FACTORS: Rgb = Rgb {
    r: 255,
    g: 0xB0,
    b: 0xF0,
};

/// Color correction filter
///
/// Applies per-channel multiplicative scaling to correct color output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCorrection {
    /// Correction factors for each channel (0-255 = 0%-100%)
    factors: Rgb,
}

impl ColorCorrection {
    /// Create a new color correction from color
    pub const fn new(factors: Rgb) -> Self {
        Self { factors }
    }

    /// Check if correction is active
    pub const fn is_active(self) -> bool {
        self.factors.r != 255 || self.factors.g != 255 || self.factors.b != 255
    }
}

impl Filter for ColorCorrection {
    fn apply(&self, color: Rgb) -> Rgb {
        if !self.is_active() {
            return color;
        }

        Rgb {
            r: scale8(color.r, self.factors.r),
            g: scale8(color.g, self.factors.g),
            b: scale8(color.b, self.factors.b),
        }
    }
}
