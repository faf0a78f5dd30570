//! Synthetic test images
//!
//! Blobs are stacks of concentric square rings (Chebyshev distance from a
//! centre), so every ring is a 4-connected band and the expected result of
//! a descent can be read off the ring levels.

use crate::TestResult;
use autoflood_core::{GrayImage, PixelDepth};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A blob of concentric square rings
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    /// Centre pixel `(x, y)`
    pub center: (u32, u32),
    /// Ring values from the centre outwards
    pub levels: Vec<u16>,
    /// Width of every ring in pixels (the centre is a square of side
    /// `2 * ring_width - 1`)
    pub ring_width: u32,
}

impl Blob {
    /// Create a blob centred on `(x, y)`
    pub fn new(center: (u32, u32), levels: &[u16], ring_width: u32) -> Self {
        Self {
            center,
            levels: levels.to_vec(),
            ring_width: ring_width.max(1),
        }
    }

    /// Value of the blob at `(x, y)`, `None` outside its outermost ring
    pub fn value_at(&self, x: u32, y: u32) -> Option<u16> {
        let d = x.abs_diff(self.center.0).max(y.abs_diff(self.center.1));
        self.levels.get((d / self.ring_width) as usize).copied()
    }

    /// Index of the ring containing `(x, y)`, `None` outside the blob
    pub fn ring_at(&self, x: u32, y: u32) -> Option<usize> {
        let d = x.abs_diff(self.center.0).max(y.abs_diff(self.center.1));
        let ring = (d / self.ring_width) as usize;
        (ring < self.levels.len()).then_some(ring)
    }
}

/// Render blobs over a constant background; overlaps keep the larger value.
pub fn blobs_image(
    width: u32,
    height: u32,
    depth: PixelDepth,
    background: u16,
    blobs: &[Blob],
) -> TestResult<GrayImage> {
    Ok(GrayImage::from_fn(width, height, depth, |x, y| {
        blobs
            .iter()
            .filter_map(|b| b.value_at(x, y))
            .fold(background, u16::max)
    })?)
}

/// A single ring blob centred in the frame.
pub fn rings_image(size: u32, levels: &[u16], ring_width: u32) -> TestResult<GrayImage> {
    let blob = Blob::new((size / 2, size / 2), levels, ring_width);
    blobs_image(size, size, PixelDepth::Bit8, 0, &[blob])
}

/// Uniform noise in `0..=max_value`, reproducible from `seed`.
pub fn random_image(
    width: u32,
    height: u32,
    depth: PixelDepth,
    max_value: u16,
    seed: u64,
) -> TestResult<GrayImage> {
    let mut rng = StdRng::seed_from_u64(seed);
    let max = max_value.min(depth.max_value());
    Ok(GrayImage::from_fn(width, height, depth, |_, _| {
        rng.random_range(0..=max)
    })?)
}
