//! Interrupt-safe driver cell for `no_std` environments.
//!
//! Main-line code and the two transfer interrupts need the same driver
//! instance. The cell is built on `critical-section`, so every access,
//! including both interrupt entry points, runs with the other ones excluded.
//!
//! ```ignore
//! static STRIP: SharedStrip<TimDma, u16, 60> = SharedStrip::new();
//!
//! STRIP.install(StripDriver::new(&config, TimDma::new(p.TIM2, p.DMA1_CH7))?);
//!
//! #[interrupt]
//! fn DMA1_CHANNEL7() {
//!     let (half, full) = TimDma::take_flags();
//!     STRIP.handle_flags(half, full);
//! }
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

use crate::PulseChannel;
use crate::driver::StripDriver;
use crate::engine::{Busy, DriverState, TransferEvent};

/// A driver shared between main-line code and transfer interrupts.
pub struct SharedStrip<C, W, const MAX_PIXELS: usize> {
    inner: Mutex<RefCell<Option<StripDriver<C, W, MAX_PIXELS>>>>,
}

impl<C, W, const MAX_PIXELS: usize> SharedStrip<C, W, MAX_PIXELS>
where
    C: PulseChannel<W>,
    W: Copy + From<u8>,
{
    /// Create an empty cell.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Put a driver into the cell.
    ///
    /// Install a driver before its first `show`: the channel reads the
    /// symbol buffer in place, and a frame started elsewhere is aborted
    /// here. The previously installed driver, if any, has its frame aborted
    /// before it is moved out and returned.
    pub fn install(
        &self,
        mut driver: StripDriver<C, W, MAX_PIXELS>,
    ) -> Option<StripDriver<C, W, MAX_PIXELS>> {
        if driver.is_busy() {
            driver.abort();
        }
        critical_section::with(|cs| {
            let mut cell = self.inner.borrow(cs).borrow_mut();
            Self::abort_in_place(&mut cell);
            cell.replace(driver)
        })
    }

    /// Take the driver out of the cell.
    ///
    /// A frame in flight is aborted before the driver moves.
    pub fn take(&self) -> Option<StripDriver<C, W, MAX_PIXELS>> {
        critical_section::with(|cs| {
            let mut cell = self.inner.borrow(cs).borrow_mut();
            Self::abort_in_place(&mut cell);
            cell.take()
        })
    }

    fn abort_in_place(cell: &mut Option<StripDriver<C, W, MAX_PIXELS>>) {
        if let Some(driver) = cell.as_mut().filter(|driver| driver.is_busy()) {
            driver.abort();
        }
    }

    /// Run `f` on the driver inside a critical section.
    ///
    /// Returns `None` if no driver is installed.
    pub fn with<R>(&self, f: impl FnOnce(&mut StripDriver<C, W, MAX_PIXELS>) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().as_mut().map(f))
    }

    /// Push the pixel store to the strip.
    ///
    /// An empty cell is reported as [`Busy`]; there is nothing to accept the frame.
    pub fn show(&self) -> Result<(), Busy> {
        self.with(StripDriver::show).unwrap_or(Err(Busy))
    }

    /// Current driver state, `None` if no driver is installed.
    pub fn state(&self) -> Option<DriverState> {
        self.with(|driver| driver.state())
    }

    /// Check if an installed driver is ready for the next frame.
    pub fn is_ready(&self) -> bool {
        self.state() == Some(DriverState::Ready)
    }

    /// Half-complete interrupt entry point.
    pub fn on_half_complete(&self) {
        let _ = self.with(StripDriver::on_half_complete);
    }

    /// Full-complete interrupt entry point.
    pub fn on_full_complete(&self) {
        let _ = self.with(StripDriver::on_full_complete);
    }

    /// Dispatch a transfer event.
    pub fn handle_event(&self, event: TransferEvent) {
        let _ = self.with(|driver| driver.handle_event(event));
    }

    /// Handle the status flags of a combined DMA interrupt.
    pub fn handle_flags(&self, half_complete: bool, full_complete: bool) {
        let _ = self.with(|driver| driver.handle_flags(half_complete, full_complete));
    }
}

impl<C, W, const MAX_PIXELS: usize> Default for SharedStrip<C, W, MAX_PIXELS>
where
    C: PulseChannel<W>,
    W: Copy + From<u8>,
{
    fn default() -> Self {
        Self::new()
    }
}
