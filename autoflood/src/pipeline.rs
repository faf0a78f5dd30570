//! Read, normalize and grow
//!
//! Thresholds apply to the stretched intensities, not to the raw samples.

use autoflood_core::{GrayImage, Mask};
use autoflood_filter::{FilterError, RescaleOptions, rescale_intensity};
use autoflood_io::{IoError, read_channel};
use autoflood_region::{GrowOptions, RegionError, RegionGrower};
use std::path::Path;
use thiserror::Error;

/// Errors from any stage of the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading the channel failed
    #[error("reading input: {0}")]
    Io(#[from] IoError),

    /// Intensity normalization failed
    #[error("normalizing intensities: {0}")]
    Filter(#[from] FilterError),

    /// Region growing failed
    #[error("growing region: {0}")]
    Region(#[from] RegionError),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Everything the pipeline needs besides the input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentOptions {
    /// Seed threshold on stretched intensities (exclusive)
    pub start_threshold: i64,
    /// Lowest threshold is `stop_threshold + 1`
    pub stop_threshold: i64,
    /// Percentiles of the contrast stretch
    pub rescale: RescaleOptions,
    /// Growth options
    pub grow: GrowOptions,
}

impl SegmentOptions {
    /// Create options with default stretch and growth settings
    pub fn new(start_threshold: i64, stop_threshold: i64) -> Self {
        Self {
            start_threshold,
            stop_threshold,
            rescale: RescaleOptions::default(),
            grow: GrowOptions::default(),
        }
    }

    /// Set the contrast stretch percentiles
    pub fn with_rescale(mut self, rescale: RescaleOptions) -> Self {
        self.rescale = rescale;
        self
    }

    /// Set the growth options
    pub fn with_grow(mut self, grow: GrowOptions) -> Self {
        self.grow = grow;
        self
    }
}

/// Stretch `image` and grow the region.
pub fn segment_image(image: &GrayImage, options: &SegmentOptions) -> PipelineResult<Mask> {
    let scaled = rescale_intensity(image, &options.rescale)?;
    let mask = RegionGrower::new(options.start_threshold, options.stop_threshold)
        .with_options(options.grow)
        .grow(&scaled)?;
    log::info!(
        "grew {} pixels ({} above start threshold {})",
        mask.count(),
        scaled.threshold_above(options.start_threshold).count(),
        options.start_threshold
    );
    Ok(mask)
}

/// Read channel `channel` of the file at `path`, then [`segment_image`].
pub fn segment_file<P: AsRef<Path>>(
    path: P,
    channel: usize,
    options: &SegmentOptions,
) -> PipelineResult<Mask> {
    let image = read_channel(path, channel)?;
    log::info!(
        "channel {}: {}x{} at {} bpp",
        channel,
        image.width(),
        image.height(),
        image.depth().bits()
    );
    segment_image(&image, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoflood_core::PixelDepth;

    #[test]
    fn test_thresholds_apply_after_stretch() {
        // Raw 100..=110 stretches onto 0..=255 with the full range
        let img = GrayImage::from_fn(11, 1, PixelDepth::Bit8, |x, _| 100 + x as u16).unwrap();
        let options =
            SegmentOptions::new(250, 100).with_rescale(RescaleOptions::new(0.0, 100.0));
        let mask = segment_image(&img, &options).unwrap();
        // Stretched values are 0, 25, 51, ..., 255; the seed is the last
        // pixel and everything above 100 connects to it
        let expected: Vec<bool> = (0..11).map(|x| x * 255 / 10 > 100).collect();
        assert_eq!(mask.data(), expected.as_slice());
    }

    #[test]
    fn test_flat_stretch_seeds_everything() {
        // Default percentiles both land on 100, so the stretch leaves every
        // pixel at 100, above the start threshold
        let mut data = vec![100u16; 200];
        data[2 * 20 + 7] = 200;
        let img = GrayImage::from_vec(20, 10, PixelDepth::Bit8, data).unwrap();
        let mask = segment_image(&img, &SegmentOptions::new(50, 10)).unwrap();
        assert_eq!(mask.count(), 200);
    }

    #[test]
    fn test_errors_are_wrapped() {
        let img = GrayImage::new(0, 0, PixelDepth::Bit8);
        let err = segment_image(&img, &SegmentOptions::new(10, 5)).unwrap_err();
        assert!(matches!(err, PipelineError::Filter(FilterError::EmptyImage)));

        let img = GrayImage::new(3, 3, PixelDepth::Bit8);
        let options =
            SegmentOptions::new(10, 10).with_grow(GrowOptions::new().with_strict_range(true));
        let err = segment_image(&img, &options).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Region(RegionError::InvalidRange { .. })
        ));
    }
}
