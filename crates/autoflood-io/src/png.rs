//! PNG image format support
//!
//! A PNG holds exactly one channel; only 8 and 16 bit grayscale inputs are
//! accepted. Masks are written as 8-bit grayscale.

use crate::{IoError, IoResult, mask_byte};
use autoflood_core::{GrayImage, Mask, PixelDepth};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a grayscale PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<GrayImage> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let depth = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight) => PixelDepth::Bit8,
        (ColorType::Grayscale, BitDepth::Sixteen) => PixelDepth::Bit16,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?} (expected 8 or 16 bit grayscale)",
                color_type, bit_depth
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let mut samples = Vec::with_capacity(width as usize * height as usize);

    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..];
        match depth {
            PixelDepth::Bit8 => {
                samples.extend(row[..width as usize].iter().map(|&v| u16::from(v)));
            }
            PixelDepth::Bit16 => {
                samples.extend(
                    row[..width as usize * 2]
                        .chunks_exact(2)
                        .map(|b| u16::from_be_bytes([b[0], b[1]])),
                );
            }
        }
    }

    Ok(GrayImage::from_vec(width, height, depth, samples)?)
}

/// Write a binary mask as an 8-bit grayscale PNG (0 / 1)
pub fn write_png_mask<W: Write>(mask: &Mask, writer: W) -> IoResult<()> {
    let (width, height) = mask.dimensions();

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let data: Vec<u8> = mask.data().iter().map(|&v| mask_byte(v)).collect();

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
