//! Percentile contrast stretch
//!
//! Samples are clipped to an input range `[low, high]` and mapped linearly
//! onto `0..=max`, where `max` is the largest value of the image depth
//! (255 or 65535). The input range is usually taken from two percentiles
//! of the image itself, which discards a small fraction of outliers at both
//! ends.
//!
//! Mapping is done through a lookup table with one entry per possible
//! sample value, so the cost is independent of the range.

use crate::{FilterError, FilterResult};
use autoflood_core::{GrayHistogram, GrayImage};

/// Percentile bounds of the contrast stretch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RescaleOptions {
    /// Percentile mapped to 0, in `[0, 100]`
    pub low_percentile: f64,
    /// Percentile mapped to the depth maximum, in `[low_percentile, 100]`
    pub high_percentile: f64,
}

impl Default for RescaleOptions {
    fn default() -> Self {
        Self {
            low_percentile: 1.0,
            high_percentile: 99.0,
        }
    }
}

impl RescaleOptions {
    /// Create options from both percentiles
    pub fn new(low_percentile: f64, high_percentile: f64) -> Self {
        Self {
            low_percentile,
            high_percentile,
        }
    }

    /// Set the low percentile
    pub fn with_low_percentile(mut self, p: f64) -> Self {
        self.low_percentile = p;
        self
    }

    /// Set the high percentile
    pub fn with_high_percentile(mut self, p: f64) -> Self {
        self.high_percentile = p;
        self
    }

    /// Check `0 <= low <= high <= 100`
    pub fn validate(&self) -> FilterResult<()> {
        let (lo, hi) = (self.low_percentile, self.high_percentile);
        if !(0.0..=100.0).contains(&lo) || !(0.0..=100.0).contains(&hi) || lo > hi {
            return Err(FilterError::InvalidParameters(format!(
                "percentiles must satisfy 0 <= low <= high <= 100, got low={}, high={}",
                lo, hi
            )));
        }
        Ok(())
    }
}

/// Input range `(low, high)` at the configured percentiles of `image`.
pub fn percentile_range(image: &GrayImage, options: &RescaleOptions) -> FilterResult<(f64, f64)> {
    options.validate()?;
    if image.is_empty() {
        return Err(FilterError::EmptyImage);
    }
    let hist = GrayHistogram::from_image(image);
    let low = hist
        .percentile(options.low_percentile)?
        .ok_or(FilterError::EmptyImage)?;
    let high = hist
        .percentile(options.high_percentile)?
        .ok_or(FilterError::EmptyImage)?;
    Ok((low, high))
}

/// Lookup table taking every sample value of `0..=max` through the stretch
/// of `[low, high]` onto `0..=max`.
///
/// A degenerate range (`low == high`) carries no contrast and is not
/// stretched: every sample clips to `low`, truncated and clamped to
/// `0..=max`.
fn build_lut(low: f64, high: f64, max: u16) -> Vec<u16> {
    let out_max = f64::from(max);
    if high <= low {
        let flat = low.clamp(0.0, out_max) as u16;
        return vec![flat; usize::from(max) + 1];
    }
    (0..=max)
        .map(|v| {
            let clipped = f64::from(v).clamp(low, high);
            // Truncate toward zero
            ((clipped - low) / (high - low) * out_max) as u16
        })
        .collect()
}

/// Stretch `image` so that `[low, high]` covers the full depth range.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `low > high` or either
/// bound is not finite, and [`FilterError::EmptyImage`] for an image with
/// no pixels.
pub fn rescale_range(image: &GrayImage, low: f64, high: f64) -> FilterResult<GrayImage> {
    if !low.is_finite() || !high.is_finite() || low > high {
        return Err(FilterError::InvalidParameters(format!(
            "invalid input range [{}, {}]",
            low, high
        )));
    }
    if image.is_empty() {
        return Err(FilterError::EmptyImage);
    }

    let max = image.depth().max_value();
    let lut = build_lut(low, high, max);
    let data = image.data().iter().map(|&v| lut[v as usize]).collect();
    let (w, h) = image.dimensions();
    Ok(GrayImage::from_vec(w, h, image.depth(), data)?)
}

/// Percentile contrast stretch.
///
/// Computes the input range from the configured percentiles, then applies
/// [`rescale_range`].
///
/// # Examples
///
/// ```
/// use autoflood_core::{GrayImage, PixelDepth};
/// use autoflood_filter::{RescaleOptions, rescale_intensity};
///
/// let img = GrayImage::from_fn(10, 10, PixelDepth::Bit8, |x, _| 100 + x as u16).unwrap();
/// let out = rescale_intensity(&img, &RescaleOptions::new(0.0, 100.0)).unwrap();
/// assert_eq!(out.get_pixel(0, 0), Some(0));
/// assert_eq!(out.get_pixel(9, 0), Some(255));
/// ```
pub fn rescale_intensity(image: &GrayImage, options: &RescaleOptions) -> FilterResult<GrayImage> {
    let (low, high) = percentile_range(image, options)?;
    log::debug!(
        "rescaling intensities: p{}={} p{}={} onto 0..={}",
        options.low_percentile,
        low,
        options.high_percentile,
        high,
        image.depth().max_value()
    );
    if high <= low {
        log::warn!(
            "percentile range is degenerate ({} .. {}); output is flat at the low bound",
            low,
            high
        );
    }
    rescale_range(image, low, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoflood_core::PixelDepth;

    #[test]
    fn test_options_validate() {
        assert!(RescaleOptions::default().validate().is_ok());
        assert!(RescaleOptions::new(50.0, 10.0).validate().is_err());
        assert!(RescaleOptions::new(-1.0, 10.0).validate().is_err());
        assert!(
            RescaleOptions::default()
                .with_high_percentile(100.5)
                .validate()
                .is_err()
        );
        let o = RescaleOptions::default()
            .with_low_percentile(2.0)
            .with_high_percentile(98.0);
        assert_eq!(o, RescaleOptions::new(2.0, 98.0));
    }

    #[test]
    fn test_lut_clips_and_truncates() {
        let lut = build_lut(10.0, 20.0, 255);
        assert_eq!(lut[0], 0);
        assert_eq!(lut[10], 0);
        assert_eq!(lut[15], 127); // 0.5 * 255 = 127.5
        assert_eq!(lut[20], 255);
        assert_eq!(lut[200], 255);
    }

    #[test]
    fn test_lut_degenerate_range() {
        let lut = build_lut(7.0, 7.0, 255);
        assert_eq!(lut.len(), 256);
        assert!(lut.iter().all(|&v| v == 7));

        let lut = build_lut(100.75, 100.75, 255);
        assert!(lut.iter().all(|&v| v == 100));
        let lut = build_lut(300.0, 300.0, 255);
        assert!(lut.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_rescale_flat_percentiles_keep_value() {
        // Both default percentiles land on 100; the hot pixel is clipped
        let mut data = vec![100u16; 200];
        data[57] = 200;
        let img = GrayImage::from_vec(20, 10, PixelDepth::Bit8, data).unwrap();
        let out = rescale_intensity(&img, &RescaleOptions::default()).unwrap();
        assert!(out.data().iter().all(|&v| v == 100));
    }

    #[test]
    fn test_rescale_range_16bit() {
        let img = GrayImage::from_vec(3, 1, PixelDepth::Bit16, vec![1000, 1500, 2000]).unwrap();
        let out = rescale_range(&img, 1000.0, 2000.0).unwrap();
        assert_eq!(out.data(), &[0, 32767, 65535]);
        assert_eq!(out.depth(), PixelDepth::Bit16);
    }

    #[test]
    fn test_rescale_range_rejects_inverted() {
        let img = GrayImage::new(2, 2, PixelDepth::Bit8);
        assert!(rescale_range(&img, 5.0, 1.0).is_err());
        assert!(rescale_range(&img, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_rescale_empty_image() {
        let img = GrayImage::new(0, 0, PixelDepth::Bit16);
        assert!(matches!(
            rescale_intensity(&img, &RescaleOptions::default()),
            Err(FilterError::EmptyImage)
        ));
    }

    #[test]
    fn test_rescale_percentiles_discard_outliers() {
        // 100 samples 0..=99 plus a hot pixel
        let mut data: Vec<u16> = (0..100).collect();
        data.push(255);
        let img = GrayImage::from_vec(101, 1, PixelDepth::Bit8, data).unwrap();
        let (lo, hi) = percentile_range(&img, &RescaleOptions::default()).unwrap();
        assert!((lo - 1.0).abs() < 1e-9);
        assert!((hi - 99.0).abs() < 1e-9);

        let out = rescale_intensity(&img, &RescaleOptions::default()).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some(0));
        assert_eq!(out.get_pixel(99, 0), Some(255));
        assert_eq!(out.get_pixel(100, 0), Some(255));
    }
}
