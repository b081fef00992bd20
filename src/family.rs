//! Supported LED chip families
//!
//! Each family fixes the wire byte order, the default bit rate and the duty
//! fractions used for logical one and logical zero.

use crate::color::ColorOrder;

/// 400 kHz bit rate (2.5 us per bit)
pub const BIT_RATE_400KHZ: u32 = 400_000;
/// 800 kHz bit rate (1.25 us per bit)
pub const BIT_RATE_800KHZ: u32 = 800_000;

/// High-time fractions of one bit period, in per-mille
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedTiming {
    /// Duty fraction of a logical one
    pub one_permille: u16,
    /// Duty fraction of a logical zero
    pub zero_permille: u16,
}

/// LED chip family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripFamily {
    /// WS2811 in slow mode: RGB, 400 kHz
    Ws2811Slow,
    /// WS2811 in fast mode: RGB, 800 kHz
    Ws2811Fast,
    /// WS2812 / WS2812B: GRB, 800 kHz
    Ws2812,
    /// SK6812 RGBW: RGBW, 800 kHz
    Sk6812,
    /// SK6812 with GRBW ordering, 800 kHz
    Sk6812Grbw,
}

impl StripFamily {
    /// Wire byte order
    pub const fn order(self) -> ColorOrder {
        match self {
            Self::Ws2811Slow | Self::Ws2811Fast => ColorOrder::Rgb,
            Self::Ws2812 => ColorOrder::Grb,
            Self::Sk6812 => ColorOrder::Rgbw,
            Self::Sk6812Grbw => ColorOrder::Grbw,
        }
    }

    /// Number of channel bytes per pixel
    pub const fn channels(self) -> usize {
        self.order().channels()
    }

    /// Default bit rate in Hz
    pub const fn bit_rate(self) -> u32 {
        match self {
            Self::Ws2811Slow => BIT_RATE_400KHZ,
            _ => BIT_RATE_800KHZ,
        }
    }

    /// Pulse timing
    pub const fn timing(self) -> LedTiming {
        match self {
            // T1H 0.60 us, T0H 0.25 us at 1.25 us
            Self::Ws2811Slow | Self::Ws2811Fast => LedTiming {
                one_permille: 480,
                zero_permille: 200,
            },
            // T1H 0.70 us, T0H 0.35 us
            Self::Ws2812 => LedTiming {
                one_permille: 560,
                zero_permille: 280,
            },
            // T1H 0.60 us, T0H 0.30 us
            Self::Sk6812 | Self::Sk6812Grbw => LedTiming {
                one_permille: 480,
                zero_permille: 240,
            },
        }
    }
}
