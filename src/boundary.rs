//! Quantizer boundary block.
//!
//! The six range endpoints (R.min, R.max, G.min, G.max, B.min, B.max) are
//! stored as 1 sign bit + 8 magnitude bits each. The resulting 54 bits are
//! zero-padded to exactly 7 bytes.

#![allow(clippy::cast_possible_wrap)]

use crate::bitbuffer::BitBuffer;
use crate::bitreader::BitReader;
use crate::error::DpcmError;
use crate::quantizer::Quantizer;

/// Size of the serialized block in bytes.
pub const BOUNDARY_BYTES: usize = 7;

/// Largest boundary magnitude the 8-bit field can hold.
pub const MAX_BOUNDARY: i32 = 255;

const MAGNITUDE_BITS: usize = 8;

/// Min/max pairs of the three channel quantizers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryBlock {
    /// R.min, R.max, G.min, G.max, B.min, B.max
    pub values: [i32; 6],
}

impl BoundaryBlock {
    /// Collect the boundaries of three quantizers in R, G, B order.
    pub fn from_quantizers(quantizers: [&dyn Quantizer; 3]) -> Self {
        let [r, g, b] = quantizers;
        Self {
            values: [
                r.min_value(),
                r.max_value(),
                g.min_value(),
                g.max_value(),
                b.min_value(),
                b.max_value(),
            ],
        }
    }

    /// `(min, max)` of the channel at `index` (0 = red).
    #[inline]
    pub fn range(&self, index: usize) -> (i32, i32) {
        (self.values[2 * index], self.values[2 * index + 1])
    }

    /// Serialize into the 7-byte signed-magnitude block.
    pub fn to_bytes(&self) -> Result<[u8; BOUNDARY_BYTES], DpcmError> {
        let mut buffer = BitBuffer::with_capacity(BOUNDARY_BYTES * 8);
        for &value in &self.values {
            if !(-MAX_BOUNDARY..=MAX_BOUNDARY).contains(&value) {
                return Err(DpcmError::BoundaryOutOfRange(value));
            }
            buffer.append_bit(u8::from(value < 0));
            buffer.append_value(value.unsigned_abs(), MAGNITUDE_BITS)?;
        }

        let mut block = [0u8; BOUNDARY_BYTES];
        block.copy_from_slice(&buffer.to_bytes());
        Ok(block)
    }

    /// Parse a 7-byte block. The 2 trailing padding bits are ignored.
    pub fn from_bytes(bytes: &[u8; BOUNDARY_BYTES]) -> Result<Self, DpcmError> {
        let mut reader = BitReader::new(bytes);
        let mut values = [0i32; 6];

        for value in &mut values {
            let negative = reader.read_bit()? == 1;
            let magnitude = reader.read_bits(MAGNITUDE_BITS)? as i32;
            *value = if negative { -magnitude } else { magnitude };
        }

        Ok(Self { values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniform::UniformQuantizer;

    #[test]
    fn test_to_bytes_layout() {
        let block = BoundaryBlock {
            values: [-3, 5, 0, 255, -255, 0],
        };
        // 1 00000011 | 0 00000101 | 0 00000000 | 0 11111111 | 1 11111111 | 0 00000000 | 00
        assert_eq!(
            block.to_bytes().unwrap(),
            [0x81, 0x81, 0x40, 0x0F, 0xFF, 0xF8, 0x00]
        );
    }

    #[test]
    fn test_from_bytes() {
        let block = BoundaryBlock::from_bytes(&[0x81, 0x81, 0x40, 0x0F, 0xFF, 0xF8, 0x00]).unwrap();
        assert_eq!(block.values, [-3, 5, 0, 255, -255, 0]);
        assert_eq!(block.range(2), (-255, 0));
    }

    #[test]
    fn test_negative_zero_reads_as_zero() {
        // sign bit set with zero magnitude for R.min
        let block = BoundaryBlock::from_bytes(&[0x80, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(block.values[0], 0);
    }

    #[test]
    fn test_out_of_range() {
        let block = BoundaryBlock {
            values: [-256, 0, 0, 0, 0, 0],
        };
        assert!(matches!(
            block.to_bytes(),
            Err(DpcmError::BoundaryOutOfRange(-256))
        ));
    }

    #[test]
    fn test_from_quantizers() {
        let r = UniformQuantizer::new(2, 50, 100).unwrap();
        let g = UniformQuantizer::new(2, -10, 10).unwrap();
        let b = UniformQuantizer::new(2, 0, 0).unwrap();

        let block = BoundaryBlock::from_quantizers([&r, &g, &b]);
        assert_eq!(block.values, [50, 100, -10, 10, 0, 0]);
        assert_eq!(block.range(0), (50, 100));
    }
}
