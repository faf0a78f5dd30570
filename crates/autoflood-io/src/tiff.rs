//! TIFF image format support
//!
//! Reading treats every page (IFD) of a multipage TIFF as one channel of
//! the acquisition, so `read_tiff_page(reader, 2)` yields channel 2.
//! Writing supports grayscale pages and binary masks.

use crate::{IoError, IoResult, mask_byte};
use autoflood_core::{GrayImage, Mask, PixelDepth};
use std::io::{Read, Seek, Write};
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::{Gray8, Gray16};
use tiff::encoder::{Compression, TiffEncoder};

/// TIFF compression format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression
    #[default]
    None,
    /// PackBits compression
    PackBits,
    /// LZW compression
    Lzw,
    /// ZIP/Deflate compression
    Zip,
}

impl TiffCompression {
    /// Convert to tiff crate's Compression enum
    fn to_tiff_compression(self) -> Compression {
        match self {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::PackBits => Compression::Packbits,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::Zip => Compression::Deflate(tiff::encoder::DeflateLevel::default()),
        }
    }
}

/// Read a specific page from a TIFF file
///
/// # Arguments
///
/// * `reader` - The reader to read from
/// * `page` - The page index (0-based)
///
/// # Errors
///
/// Returns [`IoError::ChannelOutOfRange`] if the file has fewer pages.
pub fn read_tiff_page<R: Read + Seek>(reader: R, page: usize) -> IoResult<GrayImage> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;

    // Navigate to the requested page
    for seen in 0..page {
        if !decoder.more_images() {
            return Err(IoError::ChannelOutOfRange {
                index: page,
                available: seen + 1,
            });
        }
        decoder
            .next_image()
            .map_err(|e| IoError::DecodeError(format!("TIFF page navigation error: {}", e)))?;
    }

    decode_tiff_image(&mut decoder)
}

/// Get the number of pages in a TIFF file
pub fn tiff_page_count<R: Read + Seek>(reader: R) -> IoResult<usize> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;

    let mut count = 1;
    while decoder.more_images() {
        decoder
            .next_image()
            .map_err(|e| IoError::DecodeError(format!("TIFF page navigation error: {}", e)))?;
        count += 1;
    }

    Ok(count)
}

/// Decode a grayscale TIFF image from the current decoder position
fn decode_tiff_image<R: Read + Seek>(decoder: &mut Decoder<R>) -> IoResult<GrayImage> {
    let (width, height) = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF dimensions: {}", e)))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF color type: {}", e)))?;

    let depth = match color_type {
        ColorType::Gray(8) => PixelDepth::Bit8,
        ColorType::Gray(16) => PixelDepth::Bit16,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF color type: {:?} (expected 8 or 16 bit grayscale)",
                color_type
            )));
        }
    };

    let image_data = decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(format!("Failed to read TIFF image data: {}", e)))?;

    let samples: Vec<u16> = match image_data {
        DecodingResult::U8(data) => data.into_iter().map(u16::from).collect(),
        DecodingResult::U16(data) => data,
        _ => {
            return Err(IoError::UnsupportedFormat(
                "unsupported TIFF sample format (expected unsigned integers)".to_string(),
            ));
        }
    };

    log::debug!(
        "decoded TIFF page {}x{} at {} bpp",
        width,
        height,
        depth.bits()
    );
    Ok(GrayImage::from_vec(width, height, depth, samples)?)
}

/// Write several grayscale pages, one per channel
pub fn write_tiff_multipage<W: Write + Seek>(
    pages: &[&GrayImage],
    writer: W,
    compression: TiffCompression,
) -> IoResult<()> {
    if pages.is_empty() {
        return Err(IoError::InvalidData("no pages to write".to_string()));
    }

    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| IoError::EncodeError(format!("TIFF encoder error: {}", e)))?
        .with_compression(compression.to_tiff_compression());

    for image in pages {
        let (width, height) = image.dimensions();
        match image.depth() {
            PixelDepth::Bit8 => {
                let data: Vec<u8> = image.data().iter().map(|&v| v as u8).collect();
                encoder
                    .write_image::<Gray8>(width, height, &data)
                    .map_err(|e| IoError::EncodeError(format!("TIFF write error: {}", e)))?;
            }
            PixelDepth::Bit16 => {
                encoder
                    .write_image::<Gray16>(width, height, image.data())
                    .map_err(|e| IoError::EncodeError(format!("TIFF write error: {}", e)))?;
            }
        }
    }

    Ok(())
}

/// Write a binary mask as an 8-bit page (0 / 1)
pub fn write_tiff_mask<W: Write + Seek>(
    mask: &Mask,
    writer: W,
    compression: TiffCompression,
) -> IoResult<()> {
    let (width, height) = mask.dimensions();
    let data: Vec<u8> = mask.data().iter().map(|&v| mask_byte(v)).collect();

    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| IoError::EncodeError(format!("TIFF encoder error: {}", e)))?
        .with_compression(compression.to_tiff_compression());
    encoder
        .write_image::<Gray8>(width, height, &data)
        .map_err(|e| IoError::EncodeError(format!("TIFF write error: {}", e)))?;

    Ok(())
}
