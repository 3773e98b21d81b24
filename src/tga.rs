//! Uncompressed 24-bit true-colour TGA reader/writer.
//!
//! Only image type 2 at 24 bits per pixel is supported. Pixels are stored
//! B, G, R. Rows are bottom-up unless bit 5 of the image descriptor marks a
//! top-left origin; either way the returned [`Image`] is row-major top-down.

use std::io::{self, Read, Write};

use tracing::debug;

use crate::bits::{u16_from_bytes, u16_to_bytes, Endian};
use crate::error::DpcmError;
use crate::image::{Color, Image};

const HEADER_LEN: usize = 18;
const IMAGE_TYPE_TRUE_COLOR: u8 = 2;
const PIXEL_DEPTH: u8 = 24;
const DESCRIPTOR_TOP_LEFT: u8 = 0x20;

/// TGA 2.0 footer: extension offset, developer offset, signature.
const FOOTER: &[u8; 26] = b"\0\0\0\0\0\0\0\0TRUEVISION-XFILE.\0";

/// Read a TGA image. Bytes after the pixel data are ignored.
pub fn read_tga<R: Read>(mut reader: R) -> Result<Image, DpcmError> {
    let mut header = [0u8; HEADER_LEN];
    reader.read_exact(&mut header).map_err(DpcmError::from_read)?;

    let id_length = header[0];
    let color_map_type = header[1];
    let image_type = header[2];
    let width = u16_from_bytes([header[12], header[13]], Endian::Little);
    let height = u16_from_bytes([header[14], header[15]], Endian::Little);
    let depth = header[16];
    let descriptor = header[17];

    if color_map_type != 0 {
        return Err(DpcmError::InvalidFormat(format!(
            "colour-mapped TGA not supported (colour map type {color_map_type})"
        )));
    }
    if image_type != IMAGE_TYPE_TRUE_COLOR {
        return Err(DpcmError::InvalidFormat(format!(
            "unsupported TGA image type {image_type}"
        )));
    }
    if depth != PIXEL_DEPTH {
        return Err(DpcmError::InvalidFormat(format!(
            "unsupported pixel depth {depth} (must be 24)"
        )));
    }

    let skipped = io::copy(
        &mut reader.by_ref().take(u64::from(id_length)),
        &mut io::sink(),
    )?;
    if skipped != u64::from(id_length) {
        return Err(DpcmError::UnexpectedEndOfInput);
    }

    let columns = usize::from(width);
    let rows = usize::from(height);
    let expected = columns * rows * 3;
    // grows with the data actually present, not with the header's claim
    let mut raw = Vec::new();
    reader.take(expected as u64).read_to_end(&mut raw)?;
    if raw.len() != expected {
        return Err(DpcmError::UnexpectedEndOfInput);
    }

    let top_down = descriptor & DESCRIPTOR_TOP_LEFT != 0;
    debug!(width, height, top_down, "read tga");

    let mut colors = vec![Color::default(); columns * rows];
    if columns > 0 {
        for (stored_row, row_bytes) in raw.chunks_exact(columns * 3).enumerate() {
            let row = if top_down {
                stored_row
            } else {
                rows - 1 - stored_row
            };
            for (column, bgr) in row_bytes.chunks_exact(3).enumerate() {
                colors[row * columns + column] = Color::new(bgr[2], bgr[1], bgr[0]);
            }
        }
    }

    Image::from_colors(width, height, colors)
}

/// Write `image` as a top-left origin TGA with a TGA 2.0 footer.
pub fn write_tga<W: Write>(mut writer: W, image: &Image) -> Result<(), DpcmError> {
    let mut header = [0u8; HEADER_LEN];
    header[2] = IMAGE_TYPE_TRUE_COLOR;
    header[12..14].copy_from_slice(&u16_to_bytes(image.width(), Endian::Little));
    header[14..16].copy_from_slice(&u16_to_bytes(image.height(), Endian::Little));
    header[16] = PIXEL_DEPTH;
    header[17] = DESCRIPTOR_TOP_LEFT;
    writer.write_all(&header)?;

    let mut body = Vec::with_capacity(image.len() * 3);
    for pixel in image.pixels() {
        let color = pixel.color;
        body.extend_from_slice(&[color.b, color.g, color.r]);
    }
    writer.write_all(&body)?;
    writer.write_all(FOOTER)?;
    writer.flush()?;

    debug!(
        width = image.width(),
        height = image.height(),
        "wrote tga"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Channel;

    fn sample() -> Image {
        Image::from_colors(
            2,
            2,
            vec![
                Color::new(1, 2, 3),
                Color::new(4, 5, 6),
                Color::new(7, 8, 9),
                Color::new(10, 11, 12),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_write_layout() {
        let mut out = Vec::new();
        write_tga(&mut out, &sample()).unwrap();

        assert_eq!(out.len(), 18 + 12 + 26);
        assert_eq!(out[2], 2);
        assert_eq!(&out[12..16], &[2, 0, 2, 0]);
        assert_eq!(out[16], 24);
        assert_eq!(out[17], 0x20);
        // first pixel stored B, G, R
        assert_eq!(&out[18..21], &[3, 2, 1]);
        assert!(out.ends_with(b"TRUEVISION-XFILE.\0"));
    }

    #[test]
    fn test_round_trip() {
        let mut out = Vec::new();
        write_tga(&mut out, &sample()).unwrap();
        let image = read_tga(out.as_slice()).unwrap();
        assert_eq!(image, sample());
    }

    #[test]
    fn test_bottom_up_rows() {
        let mut data = vec![0u8; 18];
        data[2] = 2;
        data[12] = 1; // width 1
        data[14] = 2; // height 2
        data[16] = 24;
        // bottom row first
        data.extend_from_slice(&[0, 0, 200]);
        data.extend_from_slice(&[0, 0, 100]);

        let image = read_tga(data.as_slice()).unwrap();
        assert_eq!(image.channel_values(Channel::Red), vec![100, 200]);
    }

    #[test]
    fn test_skips_image_id() {
        let mut data = vec![0u8; 18];
        data[0] = 3;
        data[2] = 2;
        data[12] = 1;
        data[14] = 1;
        data[16] = 24;
        data[17] = 0x20;
        data.extend_from_slice(b"abc");
        data.extend_from_slice(&[9, 8, 7]);

        let image = read_tga(data.as_slice()).unwrap();
        assert_eq!(image.pixels()[0].color, Color::new(7, 8, 9));
    }

    #[test]
    fn test_rejects_unsupported() {
        let mut data = vec![0u8; 18];
        data[2] = 10; // RLE true colour
        data[16] = 24;
        assert!(matches!(
            read_tga(data.as_slice()),
            Err(DpcmError::InvalidFormat(_))
        ));

        data[2] = 2;
        data[16] = 32;
        assert!(matches!(
            read_tga(data.as_slice()),
            Err(DpcmError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_huge_header_short_body() {
        let mut data = vec![0u8; 18];
        data[2] = 2;
        data[12..16].copy_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]); // 65535 x 65535
        data[16] = 24;
        data.extend_from_slice(&[1, 2, 3, 4, 5, 6]);

        assert!(matches!(
            read_tga(data.as_slice()),
            Err(DpcmError::UnexpectedEndOfInput)
        ));
    }

    #[test]
    fn test_truncated_pixels() {
        let mut out = Vec::new();
        write_tga(&mut out, &sample()).unwrap();
        assert!(matches!(
            read_tga(&out[..20]),
            Err(DpcmError::UnexpectedEndOfInput)
        ));
        assert!(matches!(
            read_tga(&out[..5]),
            Err(DpcmError::UnexpectedEndOfInput)
        ));
    }
}
