//! Error types for DPCM encoding/decoding.

use thiserror::Error;

/// Errors that can occur during DPCM encoding or decoding.
#[derive(Debug, Error)]
pub enum DpcmError {
    /// Quantizer bit depth outside 1-7
    #[error("invalid bit depth: {0} (must be 1-7)")]
    InvalidBitDepth(u8),

    /// Zero width or height
    #[error("invalid image dimensions: {width}x{height} (must be > 0)")]
    InvalidDimensions { width: u16, height: u16 },

    /// Quantizer range with min above max
    #[error("invalid quantizer range: min {min} > max {max}")]
    InvalidRange { min: i32, max: i32 },

    /// Quantizer boundary does not fit the 1+8 bit signed-magnitude field
    #[error("quantizer boundary {0} out of range (must be -255..=255)")]
    BoundaryOutOfRange(i32),

    /// Quantizer level count differs from the coder's 2^k
    #[error("quantizer has {actual} levels, coder expects {expected}")]
    LevelCountMismatch { expected: usize, actual: usize },

    /// Two images that must match have different dimensions
    #[error("image dimensions differ: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    DimensionMismatch {
        expected_width: u16,
        expected_height: u16,
        actual_width: u16,
        actual_height: u16,
    },

    /// Value does not fit in the requested number of bits
    #[error("value {value} does not fit in {width} bits")]
    ValueOutOfRange { value: u32, width: usize },

    /// Bit field width outside 1-32
    #[error("invalid field width: {0} (must be 1-32)")]
    InvalidLength(usize),

    /// Pixel count doesn't match width * height
    #[error("pixel count mismatch: expected {expected}, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    /// Stream ended before a header, boundary block or index stream was complete
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// Not enough bits remaining in input (underflow)
    #[error("not enough bits remaining in input")]
    Underflow,

    /// Unsupported or malformed image container
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Underlying stream failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl DpcmError {
    /// Map a short read onto [`DpcmError::UnexpectedEndOfInput`].
    pub(crate) fn from_read(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEndOfInput
        } else {
            Self::Io(err)
        }
    }
}
