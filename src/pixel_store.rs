//! Display-ready pixel bytes in transmission order

/// Maximum channel bytes per pixel
pub const MAX_CHANNELS: usize = 4;

/// Raw channel bytes of one pixel, wire order, unused slots stay zero
pub type PixelBytes = [u8; MAX_CHANNELS];

/// Fixed-capacity pixel storage
///
/// `MAX_PIXELS` is the compiled capacity; the configured strip length may be
/// shorter. Indices are expected to be in range, the driver resolves them
/// before they get here.
#[derive(Debug, Clone)]
pub struct PixelStore<const MAX_PIXELS: usize> {
    pixels: [PixelBytes; MAX_PIXELS],
    len: usize,
    channels: usize,
}

impl<const MAX_PIXELS: usize> PixelStore<MAX_PIXELS> {
    /// Create a zeroed store for `len` pixels of `channels` bytes each
    pub const fn new(len: usize, channels: usize) -> Self {
        Self {
            pixels: [[0; MAX_CHANNELS]; MAX_PIXELS],
            len,
            channels,
        }
    }

    /// Number of pixels in use
    pub const fn pixel_count(&self) -> usize {
        self.len
    }

    /// Wire bytes of one pixel
    #[inline]
    pub fn bytes(&self, index: usize) -> &[u8] {
        &self.pixels[index][..self.channels]
    }

    /// Mutable wire bytes of one pixel
    #[inline]
    pub fn bytes_mut(&mut self, index: usize) -> &mut [u8] {
        &mut self.pixels[index][..self.channels]
    }
}
