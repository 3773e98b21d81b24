//! Uniform quantizer with evenly spaced reconstruction levels.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use crate::error::DpcmError;
use crate::quantizer::{is_valid_bits, Quantizer};

/// Quantizer with 2^k levels evenly spaced over `[min, max]`.
///
/// Intermediate levels are rounded half-up; the last level is always
/// exactly `max`. The table is built once and never changes, so encoder
/// and decoder derive identical levels from the same `(bits, min, max)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniformQuantizer {
    bits: u8,
    levels: Vec<i32>,
}

impl UniformQuantizer {
    /// Build the level table for `bits` bits between `min_value` and `max_value`.
    pub fn new(bits: u8, min_value: i32, max_value: i32) -> Result<Self, DpcmError> {
        if !is_valid_bits(bits) {
            return Err(DpcmError::InvalidBitDepth(bits));
        }
        if min_value > max_value {
            return Err(DpcmError::InvalidRange {
                min: min_value,
                max: max_value,
            });
        }

        let levels = linspace(min_value, max_value, 1usize << bits);
        Ok(Self { bits, levels })
    }

    /// Bit depth of the quantization indices.
    #[inline]
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Reconstruction level table.
    #[inline]
    pub fn levels(&self) -> &[i32] {
        &self.levels
    }
}

impl Quantizer for UniformQuantizer {
    fn quantize(&self, value: i32) -> usize {
        let last = self.levels.len() - 1;
        // First level >= value; the lowest index wins among equal levels
        let insertion = self.levels.partition_point(|&level| level < value);
        if insertion <= last && self.levels[insertion] == value {
            return insertion;
        }

        let left = insertion.saturating_sub(1);
        let right = insertion.min(last);
        let to_left = self.levels[left].abs_diff(value);
        let to_right = self.levels[right].abs_diff(value);

        if to_left <= to_right {
            left
        } else {
            right
        }
    }

    fn quantized_value(&self, index: usize) -> i32 {
        self.levels[index]
    }

    fn min_value(&self) -> i32 {
        self.levels[0]
    }

    fn max_value(&self) -> i32 {
        self.levels[self.levels.len() - 1]
    }

    fn level_count(&self) -> usize {
        self.levels.len()
    }
}

/// `n` levels from `start` to `stop`, rounded half-up, last level pinned to `stop`.
fn linspace(start: i32, stop: i32, n: usize) -> Vec<i32> {
    let step = (f64::from(stop) - f64::from(start)) / (n - 1) as f64;
    let mut levels: Vec<i32> = (0..n - 1)
        .map(|i| round_half_up(f64::from(start) + i as f64 * step))
        .collect();
    levels.push(stop);
    levels
}

#[inline]
fn round_half_up(x: f64) -> i32 {
    (x + 0.5).floor() as i32
}
