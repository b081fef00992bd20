use crate::color::Rgb;

mod brightness;
mod color_correction;

pub(crate) trait Filter {
    /// Apply the filter to a single color
    fn apply(&self, color: Rgb) -> Rgb;
}

pub use brightness::BrightnessFilter;
pub use color_correction::{ColorCorrection, LED_GAMMA_FACTORS, NEUTRAL_FACTORS};

/// Filter processor - turns requested colors into display-ready colors
///
/// Brightness is applied first, then color correction, so the pixel
/// store always holds what goes on the wire.
#[derive(Debug, Clone, Copy)]
pub struct FilterProcessor {
    /// Global brightness
    pub brightness: BrightnessFilter,
    /// Per-channel gamma scaling
    pub color_correction: ColorCorrection,
}

impl FilterProcessor {
    /// Create a processor with the given brightness and optional gamma correction
    pub const fn new(brightness: u8, gamma_correction: bool) -> Self {
        let factors = if gamma_correction {
            LED_GAMMA_FACTORS
        } else {
            NEUTRAL_FACTORS
        };
        Self {
            brightness: BrightnessFilter::new(brightness),
            color_correction: ColorCorrection::new(factors),
        }
    }

    /// Process a color for storage
    #[inline]
    pub fn process(&self, color: Rgb) -> Rgb {
        let dimmed = self.brightness.apply(color);
        self.color_correction.apply(dimmed)
    }

    /// Process a white channel value for storage
    ///
    /// White is only brightness-scaled.
    #[inline]
    pub const fn process_white(&self, white: u8) -> u8 {
        self.brightness.apply_white(white)
    }
}
