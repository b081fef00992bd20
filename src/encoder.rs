//! Bit encoder
//!
//! Expands channel bytes into one compare value per bit, most significant bit
//! first. `W` is the DMA memory word (`u8`, `u16` or `u32`).

use crate::symbol_clock::DutyPair;

/// Bits per channel byte
pub const BITS_PER_CHANNEL: usize = 8;

/// Encode one byte into 8 symbols
#[inline]
pub fn encode_byte<W: From<u8>>(symbols: &mut [W], byte: u8, duty: DutyPair) {
    for (bit, symbol) in symbols.iter_mut().take(BITS_PER_CHANNEL).enumerate() {
        let is_one = (byte << bit) & 0x80 != 0;
        *symbol = W::from(if is_one { duty.high } else { duty.low });
    }
}

/// Encode a pixel's wire bytes into `symbols` starting at `offset`
///
/// Returns the number of symbols written (`bytes.len() * 8`).
///
/// # Panics
///
/// Panics if `symbols` is too short to hold the pixel at `offset`.
#[inline]
pub fn encode_pixel_into<W: From<u8>>(
    symbols: &mut [W],
    offset: usize,
    bytes: &[u8],
    duty: DutyPair,
) -> usize {
    let count = bytes.len() * BITS_PER_CHANNEL;
    let target = &mut symbols[offset..offset + count];
    for (chunk, &byte) in target.chunks_exact_mut(BITS_PER_CHANNEL).zip(bytes) {
        encode_byte(chunk, byte, duty);
    }
    count
}

/// Fill symbols with zero duty (line held low, the latch/reset gap)
#[inline]
pub fn encode_reset<W: From<u8>>(symbols: &mut [W]) {
    for symbol in symbols {
        *symbol = W::from(0);
    }
}
