//! In-memory RGB image container.

use crate::error::DpcmError;

/// One of the three colour channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in stream order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
}

/// 24-bit RGB colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Value of a single channel.
    #[inline]
    pub fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }
}

/// A colour at a grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub row: usize,
    pub column: usize,
    pub color: Color,
}

/// Row-major pixel grid.
///
/// Always holds exactly `width * height` pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u16,
    height: u16,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Wrap an existing pixel list.
    pub fn new(width: u16, height: u16, pixels: Vec<Pixel>) -> Result<Self, DpcmError> {
        let expected = usize::from(width) * usize::from(height);
        if pixels.len() != expected {
            return Err(DpcmError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image from row-major colours, assigning each pixel its position.
    pub fn from_colors(width: u16, height: u16, colors: Vec<Color>) -> Result<Self, DpcmError> {
        let columns = usize::from(width).max(1);
        let pixels = colors
            .into_iter()
            .enumerate()
            .map(|(i, color)| Pixel {
                row: i / columns,
                column: i % columns,
                color,
            })
            .collect();
        Self::new(width, height, pixels)
    }

    /// Build an image from three parallel channel planes.
    pub fn from_channels(
        width: u16,
        height: u16,
        red: &[u8],
        green: &[u8],
        blue: &[u8],
    ) -> Result<Self, DpcmError> {
        let expected = usize::from(width) * usize::from(height);
        for plane in [red, green, blue] {
            if plane.len() != expected {
                return Err(DpcmError::PixelCountMismatch {
                    expected,
                    actual: plane.len(),
                });
            }
        }

        let colors = red
            .iter()
            .zip(green)
            .zip(blue)
            .map(|((&r, &g), &b)| Color::new(r, g, b))
            .collect();
        Self::from_colors(width, height, colors)
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at `row`, `column`.
    pub fn get(&self, row: usize, column: usize) -> Option<&Pixel> {
        if column >= usize::from(self.width) {
            return None;
        }
        self.pixels.get(row * usize::from(self.width) + column)
    }

    /// One channel's values in storage order.
    pub fn channel_values(&self, channel: Channel) -> Vec<u8> {
        self.pixels.iter().map(|p| p.color.channel(channel)).collect()
    }
}
