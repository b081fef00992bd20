//! Global brightness
//!
//! Stepped integer dimming applied to every pixel write. Changing the level
//! does not touch pixels that are already stored.

use super::Filter;
use crate::{color::Rgb, math8::dim8};

/// Global brightness level (0-255, 255 = full)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessFilter {
    level: u8,
}

impl BrightnessFilter {
    /// Create a new brightness filter
    pub const fn new(level: u8) -> Self {
        Self { level }
    }

    /// Current level
    pub const fn level(self) -> u8 {
        self.level
    }

    /// Set a new level for subsequent writes
    pub fn set(&mut self, level: u8) {
        self.level = level;
    }

    /// Scale a white channel value
    pub const fn apply_white(self, white: u8) -> u8 {
        dim8(white, self.level)
    }
}

impl Filter for BrightnessFilter {
    fn apply(&self, color: Rgb) -> Rgb {
        if self.level == u8::MAX {
            return color;
        }

        Rgb {
            r: dim8(color.r, self.level),
            g: dim8(color.g, self.level),
            b: dim8(color.b, self.level),
        }
    }
}
