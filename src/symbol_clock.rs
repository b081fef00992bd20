//! Duty-cycle symbols derived from the timer tick clock
//!
//! One bit on the wire is one timer period. The compare value written for
//! each bit decides how long the line stays high, so a logical one and a
//! logical zero are two fixed compare values per family.

use embassy_time::Duration;

use crate::config::ConfigError;
use crate::family::LedTiming;

/// Rise-time compensation added to every duty fraction, in per-mille
pub const RISE_COMPENSATION_PERMILLE: u32 = 125;

/// Compare values for logical one and logical zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyPair {
    /// Compare value of a logical one
    pub high: u8,
    /// Compare value of a logical zero
    pub low: u8,
}

/// Timer period for one bit, measured in peripheral ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolClock {
    tick_hz: u32,
    bit_rate: u32,
    period: u32,
}

impl SymbolClock {
    /// Derive the bit period from the timer tick frequency
    pub const fn new(tick_hz: u32, bit_rate: u32) -> Result<Self, ConfigError> {
        if bit_rate == 0 {
            return Err(ConfigError::InvalidBitRate);
        }
        let period = tick_hz / bit_rate;
        if period < 2 {
            return Err(ConfigError::InvalidBitRate);
        }
        Ok(Self {
            tick_hz,
            bit_rate,
            period,
        })
    }

    /// Timer ticks per bit
    pub const fn period(self) -> u32 {
        self.period
    }

    /// Value for the timer auto-reload register (counts from zero)
    pub const fn reload_value(self) -> u32 {
        self.period - 1
    }

    /// Timer tick frequency in Hz
    pub const fn tick_hz(self) -> u32 {
        self.tick_hz
    }

    /// Bit rate in Hz
    pub const fn bit_rate(self) -> u32 {
        self.bit_rate
    }

    /// Compute the compare values for a family timing
    ///
    /// Each fraction gets the rise compensation added, is truncated to whole
    /// ticks and then lowered by one for the zero-based compare counter.
    pub fn duty_pair(self, timing: LedTiming) -> Result<DutyPair, ConfigError> {
        let high = self.compare_value(timing.one_permille)?;
        let low = self.compare_value(timing.zero_permille)?;
        if low >= high {
            return Err(ConfigError::DutyOutOfRange);
        }
        Ok(DutyPair { high, low })
    }

    fn compare_value(self, permille: u16) -> Result<u8, ConfigError> {
        let fraction = u64::from(permille) + u64::from(RISE_COMPENSATION_PERMILLE);
        let ticks = u64::from(self.period) * fraction / 1000;
        if ticks == 0 || ticks > u64::from(self.period) {
            return Err(ConfigError::DutyOutOfRange);
        }
        u8::try_from(ticks - 1).map_err(|_| ConfigError::DutyOutOfRange)
    }

    /// Time needed to shift `bits` symbols onto the wire
    pub fn bits_duration(self, bits: u32) -> Duration {
        let micros = (u64::from(bits) * 1_000_000).div_ceil(u64::from(self.bit_rate));
        Duration::from_micros(micros)
    }
}
