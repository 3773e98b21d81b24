//! Quantizer range calibration from raw image data.
//!
//! Each channel's quantizer spans the smallest and largest backward
//! difference of its raw values, with the first raw value counted as the
//! first difference (the encoder's first residual is that raw value).

use crate::error::DpcmError;
use crate::image::{Channel, Image};
use crate::uniform::UniformQuantizer;

/// Raw first value followed by `v[i] - v[i-1]` for every later pixel.
pub fn channel_differences(image: &Image, channel: Channel) -> Vec<i32> {
    let values = image.channel_values(channel);
    let mut diffs = Vec::with_capacity(values.len());

    if let Some(&first) = values.first() {
        diffs.push(i32::from(first));
    }
    diffs.extend(
        values
            .windows(2)
            .map(|pair| i32::from(pair[1]) - i32::from(pair[0])),
    );

    diffs
}

/// Uniform quantizer over the difference range of one channel.
pub fn calibrate_channel(
    image: &Image,
    channel: Channel,
    bits: u8,
) -> Result<UniformQuantizer, DpcmError> {
    let diffs = channel_differences(image, channel);
    let (Some(&min), Some(&max)) = (diffs.iter().min(), diffs.iter().max()) else {
        return Err(DpcmError::InvalidDimensions {
            width: image.width(),
            height: image.height(),
        });
    };

    UniformQuantizer::new(bits, min, max)
}

/// Calibrated quantizers for R, G and B.
pub fn calibrate(image: &Image, bits: u8) -> Result<[UniformQuantizer; 3], DpcmError> {
    Ok([
        calibrate_channel(image, Channel::Red, bits)?,
        calibrate_channel(image, Channel::Green, bits)?,
        calibrate_channel(image, Channel::Blue, bits)?,
    ])
}
