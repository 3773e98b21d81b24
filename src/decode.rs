//! DPCM reconstruction of a single channel.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::quantizer::Quantizer;

/// Clamp a reconstructed value into the 8-bit channel range.
#[inline]
pub fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

/// Rebuild one channel from its quantization indices.
///
/// Residual levels are accumulated exactly as the encoder's running
/// prediction; only the emitted values are clamped, the running sum is not.
pub fn decode_channel<I>(indices: I, quantizer: &dyn Quantizer) -> Vec<u8>
where
    I: IntoIterator<Item = u32>,
{
    let mut running = 0i64;
    indices
        .into_iter()
        .map(|index| {
            running += i64::from(quantizer.quantized_value(index as usize));
            clamp_channel(running)
        })
        .collect()
}

/// Split R, G, B interleaved indices into three channel lists.
pub fn deinterleave(indices: &[u32]) -> [Vec<u32>; 3] {
    let per_channel = indices.len() / 3;
    let mut channels = [
        Vec::with_capacity(per_channel),
        Vec::with_capacity(per_channel),
        Vec::with_capacity(per_channel),
    ];

    for (position, &index) in indices.iter().enumerate() {
        channels[position % 3].push(index);
    }

    channels
}
