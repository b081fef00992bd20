//! Strip driver - the public surface
//!
//! Owns the pixel store, the streaming engine and the transmission channel
//! of one data line. Color writes go through brightness and optional gamma
//! correction before they are stored, so the store always holds the bytes
//! that will be shifted out.
//!
//! Writes are allowed while a frame is in flight, but a write that lands at
//! or behind the transfer cursor only shows up in the next frame, and a
//! write to the pixel being encoded may tear. Wait for
//! [`StripDriver::is_ready`] first when that matters.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use smart_leds::SmartLedsWrite;

use crate::color::{Hsv, HsvConversion, Rgb, rgb2hsv};
use crate::config::{ConfigError, StripConfig};
use crate::encoder::encode_pixel_into;
use crate::engine::{
    Busy, DriverState, PixelSource, RESET_HALVES, StreamPhase, StreamingEngine, TransferEvent,
    frame_halves,
};
use crate::filter::FilterProcessor;
use crate::layout::StripLayout;
use crate::pixel_store::PixelStore;
use crate::symbol_clock::SymbolClock;
use crate::{Duration, PulseChannel};

/// Pixel store paired with the layout that explains it
#[derive(Debug, Clone)]
struct StripFrame<const MAX_PIXELS: usize> {
    pixels: PixelStore<MAX_PIXELS>,
    layout: StripLayout,
}

impl<const MAX_PIXELS: usize> PixelSource for StripFrame<MAX_PIXELS> {
    fn pixel_count(&self) -> usize {
        self.pixels.pixel_count()
    }

    fn symbols_per_pixel(&self) -> usize {
        self.layout.symbols_per_pixel()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn encode_pixel<W: From<u8>>(&self, index: usize, symbols: &mut [W]) {
        let segment = self.layout.segment(index as u16);
        encode_pixel_into(symbols, 0, self.pixels.bytes(index), segment.duty);
    }
}

/// Driver for one LED strip on one timer channel
///
/// - `C`: transmission channel adapter
/// - `W`: DMA memory word (`u8`, `u16` or `u32`)
/// - `MAX_PIXELS`: compiled pixel capacity
pub struct StripDriver<C, W, const MAX_PIXELS: usize> {
    channel: C,
    clock: SymbolClock,
    frame: StripFrame<MAX_PIXELS>,
    filters: FilterProcessor,
    hsv_conversion: HsvConversion,
    engine: StreamingEngine<W>,
}

impl<C, W, const MAX_PIXELS: usize> StripDriver<C, W, MAX_PIXELS>
where
    C: PulseChannel<W>,
    W: Copy + From<u8>,
{
    /// Create a driver for the configured strip
    ///
    /// The duty values are computed once here from the timer tick frequency.
    pub fn new(config: &StripConfig, channel: C) -> Result<Self, ConfigError> {
        if usize::from(config.pixel_count) > MAX_PIXELS {
            return Err(ConfigError::CapacityExceeded);
        }
        let clock = SymbolClock::new(config.tick_hz, config.effective_bit_rate())?;
        let layout = StripLayout::new(config, clock)?;
        let pixels = PixelStore::new(usize::from(layout.pixel_count()), layout.channels());

        #[cfg(feature = "esp32-log")]
        println!(
            "[StripDriver.new] {} pixels, period {} ticks, {} segment(s)",
            layout.pixel_count(),
            clock.period(),
            layout.segments().len()
        );

        Ok(Self {
            channel,
            clock,
            frame: StripFrame { pixels, layout },
            filters: FilterProcessor::new(config.brightness, config.gamma_correction),
            hsv_conversion: config.hsv_conversion,
            engine: StreamingEngine::new(),
        })
    }

    /// Tear the driver down and return the channel
    ///
    /// Stops a transfer that is still running.
    pub fn release(mut self) -> C {
        self.channel.stop();
        self.channel
    }

    /// Number of pixels on the strip
    pub const fn pixel_count(&self) -> u16 {
        self.frame.layout.pixel_count()
    }

    /// Strip layout
    pub const fn layout(&self) -> &StripLayout {
        &self.frame.layout
    }

    /// Symbol clock
    pub const fn clock(&self) -> SymbolClock {
        self.clock
    }

    /// Transmission channel
    pub const fn channel(&self) -> &C {
        &self.channel
    }

    /// Mutable transmission channel
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Set global brightness for subsequent writes
    pub fn set_brightness(&mut self, level: u8) {
        self.filters.brightness.set(level);
    }

    /// Current global brightness
    pub const fn brightness(&self) -> u8 {
        self.filters.brightness.level()
    }

    /// Set one pixel by RGB
    pub fn set_rgb(&mut self, index: u16, r: u8, g: u8, b: u8) {
        let color = self.filters.process(Rgb::new(r, g, b));
        self.store_rgb(index, color);
    }

    /// Set one pixel by HSV
    pub fn set_hsv(&mut self, index: u16, hue: u8, sat: u8, val: u8) {
        let color = self.hsv_conversion.convert(Hsv { hue, sat, val });
        self.set_rgb(index, color.r, color.g, color.b);
    }

    /// Set the white channel of one pixel
    ///
    /// No-op on 3-channel strips.
    pub fn set_white(&mut self, index: u16, w: u8) {
        let white = self.filters.process_white(w);
        self.store_white(index, white);
    }

    /// Set color and white channel of one pixel
    pub fn set_rgbw(&mut self, index: u16, r: u8, g: u8, b: u8, w: u8) {
        self.set_rgb(index, r, g, b);
        self.set_white(index, w);
    }

    /// Fill the whole strip with an RGB color
    pub fn fill_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.fill_rgb_range(0, self.last_index(), r, g, b);
    }

    /// Fill pixels `start..=end` with an RGB color
    pub fn fill_rgb_range(&mut self, start: u16, end: u16, r: u8, g: u8, b: u8) {
        let color = self.filters.process(Rgb::new(r, g, b));
        for index in start..=end {
            self.store_rgb(index, color);
        }
    }

    /// Fill the whole strip with an HSV color
    pub fn fill_hsv(&mut self, hue: u8, sat: u8, val: u8) {
        self.fill_hsv_range(0, self.last_index(), hue, sat, val);
    }

    /// Fill pixels `start..=end` with an HSV color
    ///
    /// The color is converted once for the whole range.
    pub fn fill_hsv_range(&mut self, start: u16, end: u16, hue: u8, sat: u8, val: u8) {
        let color = self.hsv_conversion.convert(Hsv { hue, sat, val });
        self.fill_rgb_range(start, end, color.r, color.g, color.b);
    }

    /// Fill the white channel of the whole strip
    pub fn fill_white(&mut self, w: u8) {
        self.fill_white_range(0, self.last_index(), w);
    }

    /// Fill the white channel of pixels `start..=end`
    pub fn fill_white_range(&mut self, start: u16, end: u16, w: u8) {
        let white = self.filters.process_white(w);
        for index in start..=end {
            self.store_white(index, white);
        }
    }

    /// Fill the whole strip with color and white
    pub fn fill_rgbw(&mut self, r: u8, g: u8, b: u8, w: u8) {
        self.fill_rgb(r, g, b);
        self.fill_white(w);
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.fill_rgb(0, 0, 0);
        if self.frame.layout.channels() == 4 {
            self.fill_white(0);
        }
    }

    /// Stored color of a pixel
    pub fn rgb(&self, index: u16) -> Option<Rgb> {
        let index = self.frame.layout.resolve(index)?;
        let order = self.frame.layout.segment(index).order();
        Some(order.load(self.frame.pixels.bytes(usize::from(index))))
    }

    /// Stored white channel of a pixel, `None` on 3-channel strips
    pub fn white(&self, index: u16) -> Option<u8> {
        let index = self.frame.layout.resolve(index)?;
        let slot = self.frame.layout.segment(index).order().white_slot()?;
        Some(self.frame.pixels.bytes(usize::from(index))[slot])
    }

    /// Stored color of a pixel as HSV
    pub fn hsv(&self, index: u16) -> Option<Hsv> {
        self.rgb(index).map(rgb2hsv)
    }

    /// Stored wire bytes of a pixel
    pub fn wire_bytes(&self, index: u16) -> Option<&[u8]> {
        let index = self.frame.layout.resolve(index)?;
        Some(self.frame.pixels.bytes(usize::from(index)))
    }

    /// Push the pixel store to the strip
    ///
    /// Returns [`Busy`] while the previous frame is still in flight.
    pub fn show(&mut self) -> Result<(), Busy> {
        let result = self.engine.show(&self.frame, &mut self.channel);

        #[cfg(feature = "esp32-log")]
        if result.is_err() {
            println!("[StripDriver.show] busy, cursor {}", self.engine.cursor());
        }

        result
    }

    /// Stop the channel and drop the frame in flight
    ///
    /// Recovery path for a channel that never delivered its completion
    /// interrupts, see [`StripDriver::frame_duration`].
    pub fn abort(&mut self) {
        self.engine.abort(&mut self.channel);
    }

    /// Half-complete interrupt entry point
    pub fn on_half_complete(&mut self) {
        self.engine.on_half_complete(&self.frame);
    }

    /// Full-complete interrupt entry point
    pub fn on_full_complete(&mut self) {
        self.engine.on_full_complete(&self.frame, &mut self.channel);
    }

    /// Dispatch a transfer event
    pub fn handle_event(&mut self, event: TransferEvent) {
        self.engine.handle_event(event, &self.frame, &mut self.channel);
    }

    /// Handle the status flags of a combined DMA interrupt
    ///
    /// Half-complete is processed before full-complete.
    pub fn handle_flags(&mut self, half_complete: bool, full_complete: bool) {
        if half_complete {
            self.on_half_complete();
        }
        if full_complete {
            self.on_full_complete();
        }
    }

    /// Current driver state
    pub const fn state(&self) -> DriverState {
        self.engine.state()
    }

    /// Check if a frame is in flight
    pub const fn is_busy(&self) -> bool {
        matches!(self.engine.state(), DriverState::Busy)
    }

    /// Check if `show` would be accepted by the engine
    pub const fn is_ready(&self) -> bool {
        !self.is_busy()
    }

    /// Transfer cursor
    pub const fn cursor(&self) -> usize {
        self.engine.cursor()
    }

    /// Stage of the current frame
    pub const fn phase(&self) -> StreamPhase {
        self.engine.phase()
    }

    /// Symbol buffer as seen by the channel
    pub fn symbols(&self) -> &[W] {
        self.engine.symbols()
    }

    /// Streaming engine
    pub const fn engine(&self) -> &StreamingEngine<W> {
        &self.engine
    }

    /// Expected wire time of one frame, reset gap included
    ///
    /// Adapters can use this to put a timeout on a stuck channel.
    pub fn frame_duration(&self) -> Duration {
        let halves = frame_halves(usize::from(self.pixel_count()));
        self.halves_duration(halves)
    }

    /// Minimum wire time of the zero-filled reset gap
    ///
    /// Odd pixel counts hold the line low for one more half.
    pub fn reset_duration(&self) -> Duration {
        self.halves_duration(RESET_HALVES)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn halves_duration(&self, halves: usize) -> Duration {
        let bits = halves * self.frame.layout.symbols_per_pixel();
        self.clock.bits_duration(bits as u32)
    }

    const fn last_index(&self) -> u16 {
        self.pixel_count() - 1
    }

    fn store_rgb(&mut self, index: u16, color: Rgb) {
        let Some(index) = self.frame.layout.resolve(index) else {
            return;
        };
        let order = self.frame.layout.segment(index).order();
        order.store(color, self.frame.pixels.bytes_mut(usize::from(index)));
    }

    fn store_white(&mut self, index: u16, white: u8) {
        let Some(index) = self.frame.layout.resolve(index) else {
            return;
        };
        let Some(slot) = self.frame.layout.segment(index).order().white_slot() else {
            return;
        };
        self.frame.pixels.bytes_mut(usize::from(index))[slot] = white;
    }
}

impl<C, W, const MAX_PIXELS: usize> SmartLedsWrite for StripDriver<C, W, MAX_PIXELS>
where
    C: PulseChannel<W>,
    W: Copy + From<u8>,
{
    type Error = Busy;
    type Color = Rgb;

    /// Write colors from the start of the strip and show them
    ///
    /// Nothing is written while a frame is in flight.
    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        if self.is_busy() {
            return Err(Busy);
        }
        for (index, color) in (0..self.pixel_count()).zip(iterator) {
            let color: Rgb = color.into();
            self.set_rgb(index, color.r, color.g, color.b);
        }
        self.show()
    }
}
