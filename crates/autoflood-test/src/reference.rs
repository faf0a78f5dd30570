//! Unrestricted reference flood fill
//!
//! Descending the thresholds one at a time admits, at the last threshold
//! `stop + 1`, every pixel reachable from the seed through pixels at or
//! above it. The final mask is therefore a single 4-connected flood fill
//! from the seed at `stop + 1`, which this module computes without
//! windows, histograms or per-region bookkeeping.

use autoflood_core::{GrayImage, Mask, Result};
use std::collections::VecDeque;

/// Expected result of growing `image` from `start` down to `stop`.
pub fn reference_flood(image: &GrayImage, start: i64, stop: i64) -> Result<Mask> {
    let seed = image.threshold_above(start);
    if stop >= start {
        return Ok(seed);
    }
    flood_from(image, &seed, stop + 1)
}

/// 4-connected flood fill from `seed` through pixels `>= floor`.
///
/// Fails if the fill reaches past the edge of a `seed` smaller than `image`.
pub fn flood_from(image: &GrayImage, seed: &Mask, floor: i64) -> Result<Mask> {
    let (w, h) = image.dimensions();
    let mut mask = seed.clone();
    let mut queue: VecDeque<(u32, u32)> = seed.iter_set().collect();

    while let Some((x, y)) = queue.pop_front() {
        let neighbors = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in neighbors {
            if nx >= w || ny >= h || mask.is_set(nx, ny) {
                continue;
            }
            let v = image.get_pixel(nx, ny).map_or(i64::MIN, i64::from);
            if v >= floor {
                mask.set(nx, ny, true)?;
                queue.push_back((nx, ny));
            }
        }
    }

    Ok(mask)
}
