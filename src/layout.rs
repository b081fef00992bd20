//! Family segments of a strip
//!
//! A data line may chain chips of different families. Every pixel index maps
//! to exactly one segment, which supplies its byte order and duty pair. The
//! same lookup is used when pixels are written and when they are streamed.

use heapless::Vec;

use crate::color::ColorOrder;
use crate::config::{ConfigError, IndexPolicy, MAX_SEGMENTS, StripConfig};
use crate::family::StripFamily;
use crate::symbol_clock::{DutyPair, SymbolClock};

/// Inclusive pixel range bound to one family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// First pixel of the segment
    pub start: u16,
    /// Last pixel of the segment, inclusive
    pub end: u16,
    /// Chip family driving the range
    pub family: StripFamily,
    /// Compare values for the family at the configured bit rate
    pub duty: DutyPair,
}

impl Segment {
    /// Check if the segment covers `index`
    pub const fn contains(self, index: u16) -> bool {
        index >= self.start && index <= self.end
    }

    /// Wire byte order
    pub const fn order(self) -> ColorOrder {
        self.family.order()
    }
}

/// Pixel count, channel count and family segments of one line
#[derive(Debug, Clone)]
pub struct StripLayout {
    pixel_count: u16,
    channels: usize,
    index_policy: IndexPolicy,
    segments: Vec<Segment, MAX_SEGMENTS>,
}

impl StripLayout {
    /// Build the segment table for a configuration
    pub fn new(config: &StripConfig, clock: SymbolClock) -> Result<Self, ConfigError> {
        let pixel_count = config.pixel_count;
        if pixel_count == 0 {
            return Err(ConfigError::EmptyStrip);
        }
        let channels = config.family.channels();

        let mut segments = Vec::new();
        let mut start = 0;
        let mut family = config.family;
        for next in &config.segments {
            if next.start <= start || next.start >= pixel_count {
                return Err(ConfigError::InvalidSegment);
            }
            if next.family.channels() != channels {
                return Err(ConfigError::MixedChannelCount);
            }
            let segment = Segment {
                start,
                end: next.start - 1,
                family,
                duty: clock.duty_pair(family.timing())?,
            };
            segments
                .push(segment)
                .map_err(|_| ConfigError::TooManySegments)?;
            start = next.start;
            family = next.family;
        }
        let last = Segment {
            start,
            end: pixel_count - 1,
            family,
            duty: clock.duty_pair(family.timing())?,
        };
        segments
            .push(last)
            .map_err(|_| ConfigError::TooManySegments)?;

        Ok(Self {
            pixel_count,
            channels,
            index_policy: config.index_policy,
            segments,
        })
    }

    /// Number of pixels on the line
    pub const fn pixel_count(&self) -> u16 {
        self.pixel_count
    }

    /// Channel bytes per pixel, shared by every segment
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// Symbols needed for one pixel
    pub const fn symbols_per_pixel(&self) -> usize {
        self.channels * 8
    }

    /// All segments in pixel order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment covering an in-range pixel
    ///
    /// Indices past the end resolve to the last segment.
    pub fn segment(&self, index: u16) -> &Segment {
        let last = self.segments.len() - 1;
        self.segments
            .iter()
            .find(|segment| segment.contains(index))
            .unwrap_or(&self.segments[last])
    }

    /// Apply the index policy
    ///
    /// Returns `None` when the write should be dropped.
    pub const fn resolve(&self, index: u16) -> Option<u16> {
        if index < self.pixel_count {
            return Some(index);
        }
        match self.index_policy {
            IndexPolicy::Wrap => Some(index % self.pixel_count),
            IndexPolicy::Discard => None,
        }
    }
}
