//! autoflood-io - Image source and mask sink
//!
//! The source reads one channel of an acquisition into a [`GrayImage`]:
//! a page of a multipage TIFF, or the only channel of a grayscale PNG.
//! The sink writes a [`Mask`] as an 8-bit image with 0 for background and
//! 1 for admitted pixels, choosing the container from the file
//! extension.
//!
//! # Examples
//!
//! ```no_run
//! use autoflood_io::{read_channel, write_mask};
//!
//! let image = read_channel("acquisition.ome.tif", 2).unwrap();
//! let mask = image.threshold_above(1000);
//! write_mask(&mask, "mask.tif").unwrap();
//! ```

mod error;
pub mod format;

#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "tiff-format")]
pub mod tiff;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use autoflood_core::{GrayImage, Mask};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Foreground value written for admitted mask pixels
pub const MASK_FOREGROUND: u8 = 1;

#[inline]
pub(crate) fn mask_byte(admitted: bool) -> u8 {
    if admitted { MASK_FOREGROUND } else { 0 }
}

/// Read channel `channel` of the image at `path`.
///
/// The container format is detected from the file's magic bytes.
///
/// # Errors
///
/// Returns [`IoError::ChannelOutOfRange`] if the container has fewer
/// channels, and format or I/O errors from the decoder.
pub fn read_channel<P: AsRef<Path>>(path: P, channel: usize) -> IoResult<GrayImage> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    log::info!(
        "reading channel {} of {} ({:?})",
        channel,
        path.display(),
        format
    );
    let reader = BufReader::new(File::open(path)?);

    match format {
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => tiff::read_tiff_page(reader, channel),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => {
            if channel != 0 {
                return Err(IoError::ChannelOutOfRange {
                    index: channel,
                    available: 1,
                });
            }
            png::read_png(reader)
        }
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write `mask` to `path`, picking the format from the extension.
pub fn write_mask<P: AsRef<Path>>(mask: &Mask, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    log::info!(
        "writing {}x{} mask ({} admitted) to {}",
        mask.width(),
        mask.height(),
        mask.count(),
        path.display()
    );
    let writer = BufWriter::new(File::create(path)?);

    match format {
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => tiff::write_tiff_mask(mask, writer, tiff::TiffCompression::Lzw),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png_mask(mask, writer),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}
