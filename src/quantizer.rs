//! Quantizer interface for predictive-residual coding.

/// Smallest supported quantizer bit depth.
pub const MIN_BITS: u8 = 1;

/// Largest supported quantizer bit depth.
pub const MAX_BITS: u8 = 7;

/// Maps residuals to quantization indices and back.
///
/// Implementations own an immutable table of reconstruction levels, so one
/// instance may be shared read-only across any number of encode/decode calls.
pub trait Quantizer {
    /// Index of the reconstruction level representing `value`.
    ///
    /// Values outside the table clamp to the first or last index.
    fn quantize(&self, value: i32) -> usize;

    /// Reconstruction level for `index`.
    ///
    /// # Panics
    /// If `index` is not below the number of levels.
    fn quantized_value(&self, index: usize) -> i32;

    /// First reconstruction level.
    fn min_value(&self) -> i32;

    /// Last reconstruction level.
    fn max_value(&self) -> i32;

    /// Number of reconstruction levels, i.e. the number of valid indices.
    fn level_count(&self) -> usize;
}

/// Check that `bits` is a supported quantizer bit depth.
pub(crate) fn is_valid_bits(bits: u8) -> bool {
    (MIN_BITS..=MAX_BITS).contains(&bits)
}
