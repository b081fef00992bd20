//! Double-buffer streaming engine
//!
//! The symbol buffer holds exactly two pixels: the first half and the second
//! half. The transmission channel reads it in a circle, raising a
//! half-complete event after the first half and a full-complete event after
//! the second. Each event frees the half that was just read, and the engine
//! refills it with the next pixel while the hardware is busy with the other
//! half. After the last pixel two zero halves form the reset gap, then the
//! channel is stopped.
//!
//! Transfer cursor:
//! - `0`: idle
//! - `2..pixel_count`: next pixel to encode into the freed half
//! - `pixel_count..pixel_count + 2`: emit a zero half
//! - `pixel_count + 2`: nothing left to encode
//!
//! Pixels `0` and `1` are encoded synchronously by [`StreamingEngine::show`].
//!
//! Every event also counts one half as read. The channel is stopped by the
//! first full-complete after both reset halves have been read, so the gap on
//! the wire is never shorter than two halves. With an odd pixel count that
//! takes one extra full cycle, and the gap grows to three halves.

use core::sync::atomic::{Ordering, compiler_fence};

use crate::PulseChannel;
use crate::encoder::{BITS_PER_CHANNEL, encode_reset};
use crate::pixel_store::MAX_CHANNELS;

/// Symbols for the widest pixel (4 channels)
pub const MAX_SYMBOLS_PER_PIXEL: usize = MAX_CHANNELS * BITS_PER_CHANNEL;

/// Length of the double buffer backing store
pub const SYMBOL_BUFFER_LEN: usize = 2 * MAX_SYMBOLS_PER_PIXEL;

/// Zero-filled halves that form the reset gap
pub const RESET_HALVES: usize = 2;

/// Halves on the wire for a frame of `pixel_count` pixels, reset gap included
///
/// The channel only stops at the end of a full cycle, so an odd pixel count
/// adds a third reset half.
pub const fn frame_halves(pixel_count: usize) -> usize {
    let halves = pixel_count + RESET_HALVES;
    halves + halves % 2
}

/// A frame accepted by the engine is still in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Busy;

/// Driver state observed by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No transfer in flight, `show` will be accepted
    Ready,
    /// A frame is being streamed
    Busy,
}

/// Hardware notification from the transmission channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEvent {
    /// The first half has been read
    HalfComplete,
    /// The second half has been read, the transfer wrapped around
    FullComplete,
}

/// One half of the symbol buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferHalf {
    First,
    Second,
}

/// Stage of the current frame, derived from the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    /// Nothing in flight
    Idle,
    /// Pixel data is still being encoded
    Streaming,
    /// Only reset-gap halves remain
    Draining,
}

/// Pixel data the engine streams from
///
/// Implementations must be cheap: `encode_pixel` runs inside the transfer
/// interrupts and has one half-buffer period (24 or 32 bit times) to finish.
pub trait PixelSource {
    /// Number of pixels in one frame
    fn pixel_count(&self) -> usize;

    /// Symbols per pixel, the size of one buffer half
    fn symbols_per_pixel(&self) -> usize;

    /// Encode pixel `index` into `symbols` (exactly one half)
    fn encode_pixel<W: From<u8>>(&self, index: usize, symbols: &mut [W]);
}

/// Streams a frame of pixels through a two-pixel circular buffer
#[derive(Debug, Clone)]
pub struct StreamingEngine<W> {
    symbols: [W; SYMBOL_BUFFER_LEN],
    half_len: usize,
    frame_len: usize,
    cursor: usize,
    halves_read: usize,
    state: DriverState,
}

impl<W: Copy + From<u8>> Default for StreamingEngine<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Copy + From<u8>> StreamingEngine<W> {
    /// Create an idle engine
    pub fn new() -> Self {
        Self {
            symbols: [W::from(0); SYMBOL_BUFFER_LEN],
            half_len: 0,
            frame_len: 0,
            cursor: 0,
            halves_read: 0,
            state: DriverState::Ready,
        }
    }

    /// Current driver state
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Transfer cursor
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reset-gap halves read by the channel in the current frame
    pub const fn reset_halves_read(&self) -> usize {
        self.halves_read.saturating_sub(self.frame_len)
    }

    /// Stage of the current frame
    pub const fn phase(&self) -> StreamPhase {
        if self.cursor == 0 {
            StreamPhase::Idle
        } else if self.cursor < self.frame_len {
            StreamPhase::Streaming
        } else {
            StreamPhase::Draining
        }
    }

    /// Number of symbols handed to the channel
    pub const fn transfer_len(&self) -> usize {
        2 * self.half_len
    }

    /// The symbols the channel reads
    pub fn symbols(&self) -> &[W] {
        &self.symbols[..self.transfer_len()]
    }

    /// Symbols of one half
    pub fn half(&self, half: BufferHalf) -> &[W] {
        let (start, end) = self.half_bounds(half);
        &self.symbols[start..end]
    }

    /// Prime both halves and start a circular transfer
    ///
    /// Rejected with [`Busy`] while a frame is in flight or the channel still
    /// reports an active transfer. There is no queue: at most one frame is
    /// outstanding.
    pub fn show<S, C>(&mut self, source: &S, channel: &mut C) -> Result<(), Busy>
    where
        S: PixelSource,
        C: PulseChannel<W>,
    {
        if self.cursor != 0 || channel.is_active() {
            return Err(Busy);
        }

        self.half_len = source.symbols_per_pixel();
        self.frame_len = source.pixel_count();
        self.refill(BufferHalf::First, 0, source);
        self.refill(BufferHalf::Second, 1, source);
        self.cursor = 2;
        self.halves_read = 0;
        self.state = DriverState::Busy;

        compiler_fence(Ordering::SeqCst);
        channel.start(&self.symbols[..2 * self.half_len]);
        Ok(())
    }

    /// Handle the half-complete event: the first half is free
    pub fn on_half_complete<S: PixelSource>(&mut self, source: &S) {
        if self.cursor == 0 {
            return;
        }
        self.halves_read += 1;
        if self.cursor < self.frame_len + 2 {
            self.refill(BufferHalf::First, self.cursor, source);
            self.cursor += 1;
        }
    }

    /// Handle the full-complete event: the second half is free
    ///
    /// Once both reset halves have been read, stops the channel and returns
    /// the engine to [`DriverState::Ready`].
    pub fn on_full_complete<S, C>(&mut self, source: &S, channel: &mut C)
    where
        S: PixelSource,
        C: PulseChannel<W>,
    {
        if self.cursor == 0 {
            return;
        }
        self.halves_read += 1;
        if self.reset_halves_read() >= RESET_HALVES {
            channel.stop();
            self.cursor = 0;
            self.halves_read = 0;
            self.state = DriverState::Ready;
        } else if self.cursor < self.frame_len + 2 {
            self.refill(BufferHalf::Second, self.cursor, source);
            self.cursor += 1;
        }
    }

    /// Stop the channel and drop the frame in flight
    ///
    /// Returns the engine to [`DriverState::Ready`]. Late events after an
    /// abort are ignored.
    pub fn abort<C: PulseChannel<W>>(&mut self, channel: &mut C) {
        channel.stop();
        self.cursor = 0;
        self.halves_read = 0;
        self.state = DriverState::Ready;
    }

    /// Dispatch a transfer event
    pub fn handle_event<S, C>(&mut self, event: TransferEvent, source: &S, channel: &mut C)
    where
        S: PixelSource,
        C: PulseChannel<W>,
    {
        match event {
            TransferEvent::HalfComplete => self.on_half_complete(source),
            TransferEvent::FullComplete => self.on_full_complete(source, channel),
        }
    }

    fn refill<S: PixelSource>(&mut self, half: BufferHalf, index: usize, source: &S) {
        let (start, end) = self.half_bounds(half);
        let target = &mut self.symbols[start..end];
        if index < self.frame_len {
            source.encode_pixel(index, target);
        } else {
            encode_reset(target);
        }
        compiler_fence(Ordering::Release);
    }

    const fn half_bounds(&self, half: BufferHalf) -> (usize, usize) {
        match half {
            BufferHalf::First => (0, self.half_len),
            BufferHalf::Second => (self.half_len, 2 * self.half_len),
        }
    }
}
