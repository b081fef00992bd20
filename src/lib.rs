#![no_std]

pub mod color;
pub mod config;
pub mod driver;
pub mod encoder;
pub mod engine;
pub mod family;
pub mod filter;
pub mod layout;
pub mod math8;
pub mod pixel_store;
pub mod shared;
pub mod symbol_clock;

pub use config::{ConfigError, IndexPolicy, StripConfig};
pub use driver::StripDriver;
pub use engine::{BufferHalf, Busy, DriverState, StreamPhase, StreamingEngine, TransferEvent};
pub use family::{BIT_RATE_400KHZ, BIT_RATE_800KHZ, StripFamily};
pub use shared::SharedStrip;
pub use symbol_clock::{DutyPair, SymbolClock};

pub use color::{ColorOrder, Hsv, HsvConversion, Rgb};
pub use embassy_time::Duration;

/// Abstract pulse transmission channel (timer PWM output fed by circular DMA)
///
/// Implement this trait for your timer/DMA pair. The adapter must call
/// [`StripDriver::on_half_complete`] and [`StripDriver::on_full_complete`]
/// (or [`SharedStrip`]'s equivalents) from its transfer interrupts, half
/// before full when both are pending.
pub trait PulseChannel<W> {
    /// Begin a circular transfer over `symbols`, one output pulse per symbol
    ///
    /// The slice lives inside the driver and keeps its address for as long as
    /// the driver is not moved, which is what the DMA needs.
    fn start(&mut self, symbols: &[W]);

    /// Halt the transfer immediately, idempotent
    fn stop(&mut self);

    /// Check if a transfer is currently running
    fn is_active(&self) -> bool;
}
