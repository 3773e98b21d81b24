//! Bit-packing utilities.
//!
//! Conversions between integers and fixed-width MSB-first bit fields,
//! concatenation of fields into zero-padded byte buffers, and the reverse.
//! Also holds the explicitly endian-aware 16-bit helpers used by the stream
//! header (big-endian) and the TGA container (little-endian).

#![allow(clippy::cast_possible_truncation)]

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::bitbuffer::{BitBuffer, MAX_FIELD_BITS};
use crate::bitreader::BitReader;
use crate::error::DpcmError;

/// Byte order of a two-byte integer field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
    /// Most significant byte first (stream header).
    Big,
    /// Least significant byte first (TGA header).
    Little,
}

/// Fixed-width MSB-first binary representation of `value`.
///
/// Returns one entry (0 or 1) per bit, left-padded with zeros to `width`.
pub fn bits_of(value: u32, width: usize) -> Result<Vec<u8>, DpcmError> {
    if width == 0 || width > MAX_FIELD_BITS {
        return Err(DpcmError::InvalidLength(width));
    }
    if width < MAX_FIELD_BITS && value >> width != 0 {
        return Err(DpcmError::ValueOutOfRange { value, width });
    }

    Ok((0..width)
        .rev()
        .map(|shift| ((value >> shift) & 1) as u8)
        .collect())
}

/// Concatenate `(value, width)` fields and zero-pad to a whole byte.
pub fn pack(fields: &[(u32, usize)]) -> Result<Vec<u8>, DpcmError> {
    let total_bits = fields.iter().map(|&(_, width)| width).sum();
    let mut buffer = BitBuffer::with_capacity(total_bits);

    for &(value, width) in fields {
        buffer.append_value(value, width)?;
    }

    Ok(buffer.to_bytes())
}

/// Pack every value at the same field width.
pub fn pack_uniform(values: &[u32], width: usize) -> Result<Vec<u8>, DpcmError> {
    let mut buffer = BitBuffer::with_capacity(values.len() * width);

    for &value in values {
        buffer.append_value(value, width)?;
    }

    Ok(buffer.to_bytes())
}

/// Number of bytes needed to hold `count` fields of `width` bits.
#[inline]
pub fn packed_len(count: usize, width: usize) -> usize {
    (count * width + 7) / 8
}

/// Split `bytes` into `count` unsigned fields of `width` bits each.
///
/// `count` must come from outside the buffer: padding bits are
/// indistinguishable from zero-valued fields, so anything after the
/// `count`-th field is ignored.
pub fn unpack(bytes: &[u8], width: usize, count: usize) -> Result<Vec<u32>, DpcmError> {
    if width == 0 || width > MAX_FIELD_BITS {
        return Err(DpcmError::InvalidLength(width));
    }
    if bytes.len() < packed_len(count, width) {
        return Err(DpcmError::UnexpectedEndOfInput);
    }

    let mut reader = BitReader::new(bytes);
    (0..count).map(|_| reader.read_bits(width)).collect()
}

/// Encode a 16-bit value in the given byte order.
pub fn u16_to_bytes(value: u16, endian: Endian) -> [u8; 2] {
    let mut buf = [0u8; 2];
    match endian {
        Endian::Big => BigEndian::write_u16(&mut buf, value),
        Endian::Little => LittleEndian::write_u16(&mut buf, value),
    }
    buf
}

/// Decode a 16-bit value in the given byte order.
pub fn u16_from_bytes(bytes: [u8; 2], endian: Endian) -> u16 {
    match endian {
        Endian::Big => BigEndian::read_u16(&bytes),
        Endian::Little => LittleEndian::read_u16(&bytes),
    }
}
