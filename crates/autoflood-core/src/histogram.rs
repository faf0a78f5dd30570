//! Gray-level histograms
//!
//! One bin per representable sample value. Used for percentile queries by
//! the contrast stretch and, restricted to pixels outside a mask, for the
//! growth engine's "is there anything new at this level" test.

use crate::error::{Error, Result};
use crate::image::GrayImage;
use crate::mask::Mask;

/// Per-value pixel counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayHistogram {
    counts: Vec<u64>,
    total: u64,
}

impl GrayHistogram {
    /// Histogram of every pixel in `image`.
    pub fn from_image(image: &GrayImage) -> Self {
        let mut counts = vec![0u64; image.depth().max_value() as usize + 1];
        for &v in image.data() {
            counts[v as usize] += 1;
        }
        Self {
            total: image.data().len() as u64,
            counts,
        }
    }

    /// Histogram of the pixels of `image` that are *not* set in `mask`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the shapes differ.
    pub fn from_unmasked(image: &GrayImage, mask: &Mask) -> Result<Self> {
        if image.dimensions() != mask.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: image.dimensions(),
                actual: mask.dimensions(),
            });
        }
        let mut counts = vec![0u64; image.depth().max_value() as usize + 1];
        let mut total = 0;
        for (&v, &m) in image.data().iter().zip(mask.data()) {
            if !m {
                counts[v as usize] += 1;
                total += 1;
            }
        }
        Ok(Self { counts, total })
    }

    /// Number of pixels with exactly `value`.
    #[inline]
    pub fn count(&self, value: u16) -> u64 {
        self.counts.get(value as usize).copied().unwrap_or(0)
    }

    /// Total number of counted pixels.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Forget one pixel of `value`. Saturates at zero.
    pub fn remove(&mut self, value: u16) {
        if let Some(c) = self.counts.get_mut(value as usize)
            && *c > 0
        {
            *c -= 1;
            self.total -= 1;
        }
    }

    /// The `k`-th smallest counted value (0-based).
    pub fn order_statistic(&self, k: u64) -> Option<u16> {
        if k >= self.total {
            return None;
        }
        let mut seen = 0u64;
        for (value, &c) in self.counts.iter().enumerate() {
            seen += c;
            if seen > k {
                return Some(value as u16);
            }
        }
        None
    }

    /// Percentile `p` in `[0, 100]`, interpolating linearly between the
    /// two nearest order statistics.
    ///
    /// Returns `None` for an empty histogram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `p` is outside `[0, 100]`.
    pub fn percentile(&self, p: f64) -> Result<Option<f64>> {
        if !(0.0..=100.0).contains(&p) {
            return Err(Error::InvalidParameter(format!(
                "percentile must be in [0, 100], got {}",
                p
            )));
        }
        if self.total == 0 {
            return Ok(None);
        }
        let rank = p / 100.0 * (self.total - 1) as f64;
        let lo = rank.floor() as u64;
        let hi = rank.ceil() as u64;
        let (Some(v_lo), Some(v_hi)) = (self.order_statistic(lo), self.order_statistic(hi)) else {
            return Ok(None);
        };
        let frac = rank - lo as f64;
        Ok(Some(
            f64::from(v_lo) + (f64::from(v_hi) - f64::from(v_lo)) * frac,
        ))
    }
}
