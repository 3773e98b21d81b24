//! # DPCM Image Codec
//!
//! Lossy image compression by closed-loop Differential Pulse-Code
//! Modulation. Every channel value is predicted from the previously
//! *reconstructed* value, the residual is mapped to a uniform quantizer
//! level, and the resulting k-bit indices are packed into a dense,
//! byte-aligned bitstream.
//!
//! Decoding rebuilds the image from that stream with the same quantizers
//! and reproduces exactly the lossy values the encoder computed.
//!
//! ## Design
//!
//! - **Safe Rust** - `#![forbid(unsafe_code)]`
//! - **No global state** - quantizers and coders are immutable values
//! - **Whole-image** - encode and decode operate on an in-memory [`Image`]
//!
//! ## API Overview
//!
//! ### Codec
//!
//! - [`DifferentialCoder`] - Stream framing, encode/decode at bit depth k
//! - [`encode_channel`] / [`decode_channel`] - Per-channel DPCM
//!
//! ### Quantization
//!
//! - [`Quantizer`] - Residual to index mapping
//! - [`UniformQuantizer`] - 2^k evenly spaced levels
//! - [`calibrate`] - Quantizer ranges from an image's backward differences
//!
//! ### Bit Packing
//!
//! - [`pack`] / [`pack_uniform`] / [`unpack`] - Fixed-width fields
//! - [`BitBuffer`] / [`BitReader`] - MSB-first bit streams
//! - [`BoundaryBlock`] - 7-byte signed-magnitude quantizer ranges
//!
//! ### Image I/O
//!
//! - [`read_tga`] / [`write_tga`] - Uncompressed 24-bit TGA
//! - [`compare`] - MSE and SNR between original and decoded images
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dpcm::{calibrate, Color, DifferentialCoder, Image};
//!
//! let image = Image::from_colors(2, 1, vec![Color::new(10, 20, 30); 2])?;
//! let [r, g, b] = calibrate(&image, 4)?;
//!
//! let coder = DifferentialCoder::new(4)?;
//! let encoded = coder.encode_to_vec(&image, [&r, &g, &b])?;
//! let decoded = coder.decode_from_slice(&encoded)?;
//!
//! assert_eq!(decoded.width(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod bitbuffer;
mod bitreader;
mod bits;
mod boundary;
mod calibrate;
mod coder;
mod decode;
mod encode;
mod error;
mod image;
mod quantizer;
mod stats;
mod tga;
mod uniform;

pub use bitbuffer::BitBuffer;
pub use bitreader::BitReader;
pub use bits::{
    bits_of, pack, pack_uniform, packed_len, u16_from_bytes, u16_to_bytes, unpack, Endian,
};
pub use boundary::{BoundaryBlock, BOUNDARY_BYTES, MAX_BOUNDARY};
pub use calibrate::{calibrate, calibrate_channel, channel_differences};
pub use coder::{DifferentialCoder, HEADER_BYTES};
pub use decode::{clamp_channel, decode_channel, deinterleave};
pub use encode::{encode_channel, interleave, ChannelCode};
pub use error::DpcmError;
pub use image::{Channel, Color, Image, Pixel};
pub use quantizer::{Quantizer, MAX_BITS, MIN_BITS};
pub use stats::{compare, ChannelStats, ImageStats};
pub use tga::{read_tga, write_tga};
pub use uniform::UniformQuantizer;
