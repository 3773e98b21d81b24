//! Closed-loop DPCM encoding of a single channel.
//!
//! Each residual is taken against the running *reconstructed* prediction,
//! i.e. the sum of the quantizer's reconstruction levels chosen so far,
//! never against the raw previous value. The decoder can only see those
//! levels, so both sides stay in lockstep and quantization error does not
//! accumulate.

#![allow(clippy::cast_possible_truncation)]

use crate::quantizer::Quantizer;

/// Quantization indices of one channel, with the encoder's own reconstruction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelCode {
    /// Quantization index per pixel.
    pub indices: Vec<u32>,
    /// Running prediction after each pixel, before clamping.
    pub reconstruction: Vec<i64>,
}

/// Quantize the residual chain of `values` with `quantizer`.
///
/// The first residual is the raw first value (prediction starts at 0).
pub fn encode_channel(values: &[u8], quantizer: &dyn Quantizer) -> ChannelCode {
    let mut code = ChannelCode {
        indices: Vec::with_capacity(values.len()),
        reconstruction: Vec::with_capacity(values.len()),
    };
    let mut prediction = 0i64;

    for &value in values {
        let residual = saturate(i64::from(value) - prediction);
        let index = quantizer.quantize(residual);
        prediction += i64::from(quantizer.quantized_value(index));

        code.indices.push(index as u32);
        code.reconstruction.push(prediction);
    }

    code
}

/// Narrow a residual to `i32`, saturating at the ends.
///
/// Every level lies inside `i32`, so a saturated residual picks the same
/// end level as the exact one would.
#[inline]
fn saturate(residual: i64) -> i32 {
    residual.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Interleave three equally long index lists as R, G, B, R, G, B, ...
pub fn interleave(red: &[u32], green: &[u32], blue: &[u32]) -> Vec<u32> {
    red.iter()
        .zip(green)
        .zip(blue)
        .flat_map(|((&r, &g), &b)| [r, g, b])
        .collect()
}
