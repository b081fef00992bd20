//! Driver configuration
//!
//! Everything here is fixed when the driver is constructed. Invalid
//! combinations are rejected with [`ConfigError`] before any pixel is touched.

use heapless::Vec;

use crate::color::HsvConversion;
use crate::family::StripFamily;

/// Maximum number of family segments on one data line, primary included
pub const MAX_SEGMENTS: usize = 4;

/// Initialization-time configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Strip length is zero
    EmptyStrip,
    /// Strip length exceeds the compiled pixel capacity
    CapacityExceeded,
    /// Bit rate is zero or too fast for the tick clock
    InvalidBitRate,
    /// A duty value does not fit the 8-bit compare register or collapses
    DutyOutOfRange,
    /// More segments than [`MAX_SEGMENTS`]
    TooManySegments,
    /// Segment start is zero, out of range or not strictly increasing
    InvalidSegment,
    /// Segments on one line disagree on channel count
    MixedChannelCount,
}

/// What happens to a pixel index past the end of the strip
///
/// The default wraps the index modulo the strip length, which tolerates
/// off-by-one caller math but also hides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexPolicy {
    /// Index is taken modulo the strip length
    #[default]
    Wrap,
    /// Out-of-range writes are ignored
    Discard,
}

/// Another chip family chained after the primary one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentStart {
    /// First pixel driven by this family
    pub start: u16,
    /// Chip family from `start` onwards
    pub family: StripFamily,
}

/// Configuration for a strip driver
#[derive(Debug, Clone)]
pub struct StripConfig {
    /// Number of pixels on the line
    pub pixel_count: u16,
    /// Family of the first pixel
    pub family: StripFamily,
    /// Timer tick frequency in Hz
    pub tick_hz: u32,
    /// Bit rate in Hz, family default when `None`
    pub bit_rate: Option<u32>,
    /// Apply the LED gamma preset on every write
    pub gamma_correction: bool,
    /// HSV algorithm
    pub hsv_conversion: HsvConversion,
    /// Initial global brightness
    pub brightness: u8,
    /// Out-of-range index handling
    pub index_policy: IndexPolicy,
    /// Further families chained on the same line, ordered by start
    pub segments: Vec<SegmentStart, { MAX_SEGMENTS - 1 }>,
}

impl StripConfig {
    /// Create a single-family configuration with default settings
    pub const fn new(pixel_count: u16, family: StripFamily, tick_hz: u32) -> Self {
        Self {
            pixel_count,
            family,
            tick_hz,
            bit_rate: None,
            gamma_correction: false,
            hsv_conversion: HsvConversion::Float,
            brightness: u8::MAX,
            index_policy: IndexPolicy::Wrap,
            segments: Vec::new(),
        }
    }

    /// Override the family bit rate
    #[must_use]
    pub fn with_bit_rate(mut self, bit_rate: u32) -> Self {
        self.bit_rate = Some(bit_rate);
        self
    }

    /// Enable or disable gamma correction
    #[must_use]
    pub fn with_gamma_correction(mut self, enabled: bool) -> Self {
        self.gamma_correction = enabled;
        self
    }

    /// Select the HSV algorithm
    #[must_use]
    pub fn with_hsv_conversion(mut self, conversion: HsvConversion) -> Self {
        self.hsv_conversion = conversion;
        self
    }

    /// Set the initial brightness
    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// Select the out-of-range index policy
    #[must_use]
    pub fn with_index_policy(mut self, policy: IndexPolicy) -> Self {
        self.index_policy = policy;
        self
    }

    /// Chain another family starting at pixel `start`
    pub fn with_segment(mut self, start: u16, family: StripFamily) -> Result<Self, ConfigError> {
        self.segments
            .push(SegmentStart { start, family })
            .map_err(|_| ConfigError::TooManySegments)?;
        Ok(self)
    }

    /// Effective bit rate
    pub fn effective_bit_rate(&self) -> u32 {
        self.bit_rate.unwrap_or(self.family.bit_rate())
    }
}
