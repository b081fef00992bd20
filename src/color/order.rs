//! Wire byte order of a pixel

use crate::color::Rgb;

/// Order in which a pixel's channel bytes are shifted onto the data line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOrder {
    Rgb,
    Grb,
    Rgbw,
    Grbw,
}

impl ColorOrder {
    /// Number of channel bytes per pixel
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb | Self::Grb => 3,
            Self::Rgbw | Self::Grbw => 4,
        }
    }

    /// Byte slots of the red, green and blue channels
    pub const fn rgb_slots(self) -> [usize; 3] {
        match self {
            Self::Rgb | Self::Rgbw => [0, 1, 2],
            Self::Grb | Self::Grbw => [1, 0, 2],
        }
    }

    /// Byte slot of the white channel, if the order has one
    pub const fn white_slot(self) -> Option<usize> {
        match self {
            Self::Rgb | Self::Grb => None,
            Self::Rgbw | Self::Grbw => Some(3),
        }
    }

    /// Write a color into `bytes` in wire order
    ///
    /// The white slot is left untouched.
    pub fn store(self, color: Rgb, bytes: &mut [u8]) {
        let [r, g, b] = self.rgb_slots();
        bytes[r] = color.r;
        bytes[g] = color.g;
        bytes[b] = color.b;
    }

    /// Read a color back from wire-ordered `bytes`
    pub fn load(self, bytes: &[u8]) -> Rgb {
        let [r, g, b] = self.rgb_slots();
        Rgb::new(bytes[r], bytes[g], bytes[b])
    }
}
