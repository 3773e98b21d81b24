//! Sequential bit reader for parsing packed data.
//!
//! ## Bit Ordering
//! Bits are read MSB-first within each byte:
//! - Bit position 0 in a byte is bit 7 (MSB)
//! - Bit position 7 in a byte is bit 0 (LSB)

#![allow(clippy::cast_possible_truncation)]

use crate::bitbuffer::MAX_FIELD_BITS;
use crate::error::DpcmError;

/// Sequential bit reader for parsing packed data.
///
/// Reads bits MSB-first from a byte slice.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    /// Source data.
    data: &'a [u8],
    /// Total number of bits available.
    num_bits: usize,
    /// Current bit position.
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new bit reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            num_bits: data.len() * 8,
            bit_pos: 0,
        }
    }

    /// Get number of remaining bits.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.num_bits.saturating_sub(self.bit_pos)
    }

    /// Read a single bit.
    ///
    /// # Returns
    /// The bit value (0 or 1), or error if no bits remain.
    #[inline]
    pub fn read_bit(&mut self) -> Result<u8, DpcmError> {
        if self.bit_pos >= self.num_bits {
            return Err(DpcmError::Underflow);
        }

        let byte_index = self.bit_pos >> 3; // / 8
        let bit_index = self.bit_pos & 7; // % 8

        let bit = (self.data[byte_index] >> (7 - bit_index)) & 1;

        self.bit_pos += 1;

        Ok(bit)
    }

    /// Read multiple bits into a u32.
    ///
    /// # Arguments
    /// * `num_bits` - Number of bits to read (1-32)
    ///
    /// # Returns
    /// The bits packed into a u32 (right-justified), or error.
    #[inline]
    pub fn read_bits(&mut self, num_bits: usize) -> Result<u32, DpcmError> {
        if num_bits == 0 || num_bits > MAX_FIELD_BITS {
            return Err(DpcmError::InvalidLength(num_bits));
        }

        if self.remaining() < num_bits {
            return Err(DpcmError::Underflow);
        }

        let mut value = 0u64;
        let mut bits_remaining = num_bits;

        while bits_remaining > 0 {
            let byte_index = self.bit_pos >> 3;
            let bit_offset = self.bit_pos & 7;
            let bits_in_byte = 8 - bit_offset;
            let bits_to_read = bits_remaining.min(bits_in_byte);

            let shift = bits_in_byte - bits_to_read;
            let mask = ((1u32 << bits_to_read) - 1) as u8;
            let bits = (self.data[byte_index] >> shift) & mask;

            value = (value << bits_to_read) | u64::from(bits);
            self.bit_pos += bits_to_read;
            bits_remaining -= bits_to_read;
        }

        Ok(value as u32)
    }
}
