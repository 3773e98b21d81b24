//! Variable-length bit buffer for building packed output.
//!
//! Fixed-width fields are appended sequentially MSB-first. When the buffer
//! is turned into bytes, the final partial byte is padded with zero bits.
//!
//! ## Bit Ordering
//! Bits are appended MSB-first within each byte:
//! - First bit appended goes to bit position 7
//! - Second bit goes to position 6, etc.

#![allow(clippy::cast_possible_truncation)]

use crate::error::DpcmError;

/// Widest field accepted by [`BitBuffer::append_value`].
pub const MAX_FIELD_BITS: usize = 32;

/// Variable-length bit buffer for building packed output.
///
/// Uses a 64-bit accumulator so fields of up to 32 bits never overflow it.
#[derive(Clone, Debug, Default)]
pub struct BitBuffer {
    /// Byte storage for flushed bits.
    data: Vec<u8>,
    /// Total number of bits in the buffer.
    num_bits: usize,
    /// 64-bit accumulator for pending bits.
    acc: u64,
    /// Number of bits in the accumulator.
    acc_len: usize,
}

impl BitBuffer {
    /// Create an empty bit buffer sized for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity((bits + 7) / 8),
            num_bits: 0,
            acc: 0,
            acc_len: 0,
        }
    }

    /// Get the total number of bits in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.num_bits
    }

    /// Check if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// Flush complete bytes from accumulator to data buffer.
    fn flush_acc(&mut self) {
        while self.acc_len >= 8 {
            self.acc_len -= 8;
            let byte = (self.acc >> self.acc_len) as u8;
            self.data.push(byte);
            self.acc &= (1u64 << self.acc_len) - 1;
        }
    }

    /// Append a single bit to the buffer.
    ///
    /// # Arguments
    /// * `bit` - Bit value (0 or non-zero for 1)
    pub fn append_bit(&mut self, bit: u8) {
        let bit_val = u64::from(bit != 0);
        self.acc = (self.acc << 1) | bit_val;
        self.acc_len += 1;
        self.num_bits += 1;

        if self.acc_len >= 8 {
            self.flush_acc();
        }
    }

    /// Append a right-justified value as a `num_bits` wide field.
    ///
    /// # Arguments
    /// * `value` - Value to append, must be below 2^`num_bits`
    /// * `num_bits` - Field width (1-32)
    pub fn append_value(&mut self, value: u32, num_bits: usize) -> Result<(), DpcmError> {
        if num_bits == 0 || num_bits > MAX_FIELD_BITS {
            return Err(DpcmError::InvalidLength(num_bits));
        }
        if num_bits < MAX_FIELD_BITS && value >> num_bits != 0 {
            return Err(DpcmError::ValueOutOfRange {
                value,
                width: num_bits,
            });
        }

        self.acc = (self.acc << num_bits) | u64::from(value);
        self.acc_len += num_bits;
        self.num_bits += num_bits;

        self.flush_acc();

        Ok(())
    }

    /// Convert buffer to bytes, zero-padding the final byte.
    pub fn to_bytes(&self) -> Vec<u8> {
        let num_bytes = (self.num_bits + 7) / 8;
        let mut result = Vec::with_capacity(num_bytes);

        result.extend_from_slice(&self.data);

        if self.acc_len > 0 {
            // Shift accumulator bits to MSB position
            let last_byte = (self.acc << (8 - self.acc_len)) as u8;
            result.push(last_byte);
        }

        result
    }
}
