//! Differential coder: stream framing around per-channel DPCM.
//!
//! ## Stream Layout
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 2 | width (big-endian) |
//! | 2 | 2 | height (big-endian) |
//! | 4 | 7 | boundary block |
//! | 11 | ceil(w·h·3·k/8) | k-bit indices, R,G,B interleaved, zero-padded |
//!
//! The bit depth k is not stored; the decoder must be given the same k.

use std::io::{Read, Write};

use tracing::{debug, trace};

use crate::bits::{pack_uniform, packed_len, u16_from_bytes, u16_to_bytes, unpack, Endian};
use crate::boundary::{BoundaryBlock, BOUNDARY_BYTES};
use crate::decode::{decode_channel, deinterleave};
use crate::encode::{encode_channel, interleave};
use crate::error::DpcmError;
use crate::image::{Channel, Image};
use crate::quantizer::{is_valid_bits, Quantizer};
use crate::uniform::UniformQuantizer;

/// Width and height fields.
pub const HEADER_BYTES: usize = 4;

/// Closed-loop DPCM encoder/decoder at a fixed bit depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifferentialCoder {
    bits: u8,
}

impl DifferentialCoder {
    /// Create a coder for `bits`-bit quantization indices (1-7).
    pub fn new(bits: u8) -> Result<Self, DpcmError> {
        if !is_valid_bits(bits) {
            return Err(DpcmError::InvalidBitDepth(bits));
        }
        Ok(Self { bits })
    }

    #[inline]
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Total stream size for a `width` x `height` image.
    pub fn encoded_len(&self, width: u16, height: u16) -> usize {
        HEADER_BYTES + BOUNDARY_BYTES + packed_len(index_count(width, height), self.field_bits())
    }

    /// Encode `image` with one quantizer per channel (R, G, B) into `writer`.
    ///
    /// Each quantizer must have exactly 2^k levels: the decoder rebuilds a
    /// 2^k-level table from the stored boundaries.
    pub fn encode<W: Write>(
        &self,
        image: &Image,
        quantizers: [&dyn Quantizer; 3],
        mut writer: W,
    ) -> Result<(), DpcmError> {
        check_dimensions(image.width(), image.height())?;
        self.check_levels(quantizers)?;

        let boundaries = BoundaryBlock::from_quantizers(quantizers);
        let boundary_bytes = boundaries.to_bytes()?;
        debug!(
            width = image.width(),
            height = image.height(),
            bits = self.bits,
            boundaries = ?boundaries.values,
            "encoding image"
        );

        let codes: Vec<Vec<u32>> = Channel::ALL
            .iter()
            .zip(quantizers)
            .map(|(&channel, quantizer)| {
                encode_channel(&image.channel_values(channel), quantizer).indices
            })
            .collect();
        let indices = interleave(&codes[0], &codes[1], &codes[2]);
        let packed = pack_uniform(&indices, self.field_bits())?;
        trace!(indices = indices.len(), bytes = packed.len(), "packed indices");

        writer.write_all(&u16_to_bytes(image.width(), Endian::Big))?;
        writer.write_all(&u16_to_bytes(image.height(), Endian::Big))?;
        writer.write_all(&boundary_bytes)?;
        writer.write_all(&packed)?;
        writer.flush()?;

        Ok(())
    }

    /// Encode into a new byte vector.
    pub fn encode_to_vec(
        &self,
        image: &Image,
        quantizers: [&dyn Quantizer; 3],
    ) -> Result<Vec<u8>, DpcmError> {
        let mut out = Vec::with_capacity(self.encoded_len(image.width(), image.height()));
        self.encode(image, quantizers, &mut out)?;
        Ok(out)
    }

    /// Decode an image from `reader`.
    ///
    /// Reads exactly the header, boundary block and computed index bytes;
    /// anything after them is left unread.
    pub fn decode<R: Read>(&self, mut reader: R) -> Result<Image, DpcmError> {
        let mut header = [0u8; HEADER_BYTES];
        reader.read_exact(&mut header).map_err(DpcmError::from_read)?;
        let width = u16_from_bytes([header[0], header[1]], Endian::Big);
        let height = u16_from_bytes([header[2], header[3]], Endian::Big);
        check_dimensions(width, height)?;

        let mut boundary_bytes = [0u8; BOUNDARY_BYTES];
        reader
            .read_exact(&mut boundary_bytes)
            .map_err(DpcmError::from_read)?;
        let boundaries = BoundaryBlock::from_bytes(&boundary_bytes)?;
        debug!(
            width,
            height,
            bits = self.bits,
            boundaries = ?boundaries.values,
            "decoding image"
        );

        let quantizer = |channel| {
            let (min, max) = boundaries.range(channel);
            UniformQuantizer::new(self.bits, min, max)
        };
        let red_q = quantizer(0)?;
        let green_q = quantizer(1)?;
        let blue_q = quantizer(2)?;

        let count = index_count(width, height);
        let mut packed = vec![0u8; packed_len(count, self.field_bits())];
        reader.read_exact(&mut packed).map_err(DpcmError::from_read)?;
        let indices = unpack(&packed, self.field_bits(), count)?;
        trace!(indices = indices.len(), bytes = packed.len(), "unpacked indices");

        let [red, green, blue] = deinterleave(&indices);
        let red = decode_channel(red, &red_q);
        let green = decode_channel(green, &green_q);
        let blue = decode_channel(blue, &blue_q);

        Image::from_channels(width, height, &red, &green, &blue)
    }

    /// Decode from an in-memory stream.
    pub fn decode_from_slice(&self, data: &[u8]) -> Result<Image, DpcmError> {
        self.decode(data)
    }

    fn check_levels(&self, quantizers: [&dyn Quantizer; 3]) -> Result<(), DpcmError> {
        let expected = 1usize << self.bits;
        match quantizers.iter().find(|q| q.level_count() != expected) {
            Some(q) => Err(DpcmError::LevelCountMismatch {
                expected,
                actual: q.level_count(),
            }),
            None => Ok(()),
        }
    }

    #[inline]
    fn field_bits(&self) -> usize {
        usize::from(self.bits)
    }
}

fn index_count(width: u16, height: u16) -> usize {
    usize::from(width) * usize::from(height) * 3
}

fn check_dimensions(width: u16, height: u16) -> Result<(), DpcmError> {
    if width == 0 || height == 0 {
        return Err(DpcmError::InvalidDimensions { width, height });
    }
    Ok(())
}
