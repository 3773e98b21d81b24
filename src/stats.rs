//! Reconstruction quality: mean squared error and signal-to-noise ratio.

#![allow(clippy::cast_precision_loss)]

use std::fmt;

use crate::error::DpcmError;
use crate::image::{Channel, Image};

/// MSE and SNR of one channel (or of all channels together).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelStats {
    /// Mean squared error per pixel.
    pub mse: f64,
    /// Mean squared original signal divided by `mse`; infinite for a lossless match.
    pub snr: f64,
}

impl ChannelStats {
    fn from_sums(error_sum: f64, signal_sum: f64, pixels: usize) -> Self {
        let n = pixels as f64;
        let mse = error_sum / n;
        let snr = if error_sum > 0.0 {
            (signal_sum / n) / mse
        } else {
            f64::INFINITY
        };
        Self { mse, snr }
    }
}

/// Quality of a decoded image against its original.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageStats {
    /// All channels; per pixel the three squared errors are summed.
    pub total: ChannelStats,
    pub red: ChannelStats,
    pub green: ChannelStats,
    pub blue: ChannelStats,
}

/// Compare `decoded` against `original`.
pub fn compare(original: &Image, decoded: &Image) -> Result<ImageStats, DpcmError> {
    if original.width() != decoded.width() || original.height() != decoded.height() {
        return Err(DpcmError::DimensionMismatch {
            expected_width: original.width(),
            expected_height: original.height(),
            actual_width: decoded.width(),
            actual_height: decoded.height(),
        });
    }
    if original.is_empty() {
        return Err(DpcmError::InvalidDimensions {
            width: original.width(),
            height: original.height(),
        });
    }

    let mut error = [0f64; 3];
    let mut signal = [0f64; 3];

    for (before, after) in original.pixels().iter().zip(decoded.pixels()) {
        for (i, channel) in Channel::ALL.into_iter().enumerate() {
            let b = f64::from(before.color.channel(channel));
            let a = f64::from(after.color.channel(channel));
            error[i] += (b - a).powi(2);
            signal[i] += b.powi(2);
        }
    }

    let n = original.len();
    Ok(ImageStats {
        total: ChannelStats::from_sums(error.iter().sum(), signal.iter().sum(), n),
        red: ChannelStats::from_sums(error[0], signal[0], n),
        green: ChannelStats::from_sums(error[1], signal[1], n),
        blue: ChannelStats::from_sums(error[2], signal[2], n),
    })
}

impl fmt::Display for ImageStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mse = {}", self.total.mse)?;
        writeln!(f, "mse(r) = {}", self.red.mse)?;
        writeln!(f, "mse(g) = {}", self.green.mse)?;
        writeln!(f, "mse(b) = {}", self.blue.mse)?;
        writeln!(f, "SNR = {}", self.total.snr)?;
        writeln!(f, "SNR(r) = {}", self.red.snr)?;
        writeln!(f, "SNR(g) = {}", self.green.snr)?;
        write!(f, "SNR(b) = {}", self.blue.snr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Color;

    #[test]
    fn test_identical_images() {
        let image = Image::from_colors(2, 1, vec![Color::new(10, 20, 30); 2]).unwrap();
        let stats = compare(&image, &image).unwrap();

        assert_eq!(stats.total.mse, 0.0);
        assert!(stats.total.snr.is_infinite());
    }

    #[test]
    fn test_known_error() {
        let before = Image::from_colors(2, 1, vec![Color::new(10, 0, 4); 2]).unwrap();
        let after = Image::from_colors(
            2,
            1,
            vec![Color::new(12, 0, 4), Color::new(10, 0, 0)],
        )
        .unwrap();

        let stats = compare(&before, &after).unwrap();

        // red: (4 + 0) / 2
        assert_eq!(stats.red.mse, 2.0);
        assert_eq!(stats.red.snr, 100.0 / 2.0);
        assert_eq!(stats.green.mse, 0.0);
        assert_eq!(stats.green.snr, f64::INFINITY);
        // blue: (0 + 16) / 2
        assert_eq!(stats.blue.mse, 8.0);
        assert_eq!(stats.blue.snr, 16.0 / 8.0);
        // total: (4 + 16) / 2; signal (100 + 16) per pixel
        assert_eq!(stats.total.mse, 10.0);
        assert_eq!(stats.total.snr, 116.0 / 10.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Image::from_colors(2, 1, vec![Color::default(); 2]).unwrap();
        let b = Image::from_colors(1, 2, vec![Color::default(); 2]).unwrap();
        assert!(matches!(
            compare(&a, &b),
            Err(DpcmError::DimensionMismatch {
                expected_width: 2,
                expected_height: 1,
                actual_width: 1,
                actual_height: 2,
            })
        ));
    }

    #[test]
    fn test_black_image_is_lossless() {
        let image = Image::from_colors(1, 1, vec![Color::new(0, 0, 0)]).unwrap();
        let stats = compare(&image, &image).unwrap();

        assert_eq!(stats.total.mse, 0.0);
        assert_eq!(stats.total.snr, f64::INFINITY);
        assert_eq!(stats.red.snr, f64::INFINITY);
    }

    #[test]
    fn test_display() {
        let image = Image::from_colors(1, 1, vec![Color::new(1, 1, 1)]).unwrap();
        let text = compare(&image, &image).unwrap().to_string();
        assert!(text.starts_with("mse = 0"));
        assert!(text.contains("SNR(b) = inf"));
    }
}
