//! Shared test infrastructure: a recording transmission channel and a
//! simulator that plays the DMA's part.

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use myrtio_pwm_strip::{BufferHalf, PulseChannel, StripConfig, StripDriver, StripFamily};

/// Timer tick clock used throughout the tests (72 MHz, 90 ticks per bit at 800 kHz)
pub const TICK_HZ: u32 = 72_000_000;

/// WS2812 duty values at 72 MHz / 800 kHz
pub const WS2812_HIGH: u16 = 60;
pub const WS2812_LOW: u16 = 35;

/// Recording pulse channel
#[derive(Debug, Default)]
pub struct MockChannel {
    pub active: bool,
    pub starts: usize,
    pub stops: usize,
    pub last_len: usize,
}

impl<W> PulseChannel<W> for MockChannel {
    fn start(&mut self, symbols: &[W]) {
        self.active = true;
        self.starts += 1;
        self.last_len = symbols.len();
    }

    fn stop(&mut self) {
        self.active = false;
        self.stops += 1;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

pub type TestDriver<const N: usize> = StripDriver<MockChannel, u16, N>;

pub fn ws2812_config(pixel_count: u16) -> StripConfig {
    StripConfig::new(pixel_count, StripFamily::Ws2812, TICK_HZ)
}

pub fn ws2812_driver<const N: usize>(pixel_count: u16) -> TestDriver<N> {
    StripDriver::new(&ws2812_config(pixel_count), MockChannel::default()).unwrap()
}

/// Result of one simulated frame
#[derive(Debug)]
pub struct FrameCapture<W> {
    /// Symbols in the order the hardware read them
    pub wire: Vec<W>,
    /// Interrupts delivered until the channel stopped
    pub events: usize,
    /// Cursor value after `show` and after every event
    pub cursors: Vec<usize>,
}

/// Drain an accepted frame the way a circular DMA would
///
/// Each half is captured before its completion event fires. Stops after at
/// most `2 * (pixel_count + 2)` events.
pub fn run_frame<W, const N: usize>(
    driver: &mut StripDriver<MockChannel, W, N>,
) -> FrameCapture<W>
where
    W: Copy + From<u8>,
{
    let limit = 2 * (usize::from(driver.pixel_count()) + 2);
    let mut capture = FrameCapture {
        wire: Vec::new(),
        events: 0,
        cursors: vec![driver.cursor()],
    };

    while driver.channel().active && capture.events < limit {
        capture
            .wire
            .extend_from_slice(driver.engine().half(BufferHalf::First));
        driver.on_half_complete();
        capture.events += 1;
        capture.cursors.push(driver.cursor());

        capture
            .wire
            .extend_from_slice(driver.engine().half(BufferHalf::Second));
        driver.on_full_complete();
        capture.events += 1;
        capture.cursors.push(driver.cursor());
    }

    capture
}

/// Expected symbols of one byte
pub fn byte_symbols(byte: u8, high: u16, low: u16) -> Vec<u16> {
    (0..8)
        .map(|bit| if byte & (0x80 >> bit) != 0 { high } else { low })
        .collect()
}
