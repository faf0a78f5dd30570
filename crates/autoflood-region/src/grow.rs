//! Threshold-descent region growing
//!
//! Growth starts from the seed `I > start` and lowers an admission
//! threshold one level at a time, from the image maximum down to
//! `stop + 1`. At each level a pixel joins the mask when its intensity is at
//! least the threshold and it touches the mask (4-connectivity). New pixels
//! are admitted repeatedly until nothing changes, so at every level the
//! mask becomes the closure "mask plus every pixel `>= threshold` connected
//! to it through pixels `>= threshold`".
//!
//! Two shortcuts keep this tractable on large images without changing the
//! result:
//!
//! - A histogram of the values still outside the mask tells whether any
//!   unadmitted pixel sits exactly at the current level. If none does, the
//!   closure at this level equals the closure at the previous one and the
//!   level is skipped.
//! - Each connected region is grown inside a window: its bounding box plus a
//!   one-pixel margin, clipped to the image. When admitted pixels reach a
//!   window edge that is not an image edge, the window is enlarged past
//!   them (by a margin that doubles on every repeat) and the region is grown
//!   again.

use crate::boundary::outer_boundary;
use crate::conncomp::{ConnectivityType, find_connected_components};
use crate::error::{RegionError, RegionResult};
use autoflood_core::{Box, GrayHistogram, GrayImage, Mask};
use std::ops::ControlFlow;

/// Connectivity used for regions and boundaries during growth
pub const GROWTH_CONNECTIVITY: ConnectivityType = ConnectivityType::FourWay;

/// Options for region growing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GrowOptions {
    /// Reject `stop >= start` with [`RegionError::InvalidRange`] instead of
    /// returning the seed unchanged
    pub strict_range: bool,
}

impl GrowOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set strict range checking
    pub fn with_strict_range(mut self, strict: bool) -> Self {
        self.strict_range = strict;
        self
    }
}

/// Summary of one processed threshold level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Admission threshold of this level
    pub threshold: u16,
    /// Pixels admitted at this level
    pub admitted: usize,
    /// Regions of the mask at the start of this level
    pub regions: usize,
    /// Mask area after this level
    pub area: usize,
}

/// Grows a mask from a start threshold down to a stop threshold
///
/// # Examples
///
/// ```
/// use autoflood_core::{GrayImage, PixelDepth};
/// use autoflood_region::RegionGrower;
///
/// // 9 7 5 0 6
/// let img = GrayImage::from_vec(5, 1, PixelDepth::Bit8, vec![9, 7, 5, 0, 6]).unwrap();
/// let mask = RegionGrower::new(8, 4).grow(&img).unwrap();
/// assert_eq!(mask.data(), &[true, true, true, false, false]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionGrower {
    start_threshold: i64,
    stop_threshold: i64,
    options: GrowOptions,
}

impl RegionGrower {
    /// Create a grower for the seed `I > start_threshold`, descending to
    /// `stop_threshold` (exclusive)
    pub fn new(start_threshold: i64, stop_threshold: i64) -> Self {
        Self {
            start_threshold,
            stop_threshold,
            options: GrowOptions::default(),
        }
    }

    /// Set the options
    pub fn with_options(mut self, options: GrowOptions) -> Self {
        self.options = options;
        self
    }

    pub fn start_threshold(&self) -> i64 {
        self.start_threshold
    }

    pub fn stop_threshold(&self) -> i64 {
        self.stop_threshold
    }

    pub fn options(&self) -> &GrowOptions {
        &self.options
    }

    /// Grow the region of `image`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::EmptyImage`] for an image without pixels and
    /// [`RegionError::InvalidRange`] for `stop >= start` when strict range
    /// checking is on.
    pub fn grow(&self, image: &GrayImage) -> RegionResult<Mask> {
        self.grow_with_observer(image, |_| ControlFlow::Continue(()))
    }

    /// Grow the region, reporting every processed threshold level.
    ///
    /// Levels skipped by the early-exit check are not reported, and an empty
    /// seed reports no levels at all. Returning
    /// [`ControlFlow::Break`] from `observer` stops the run with
    /// [`RegionError::Cancelled`].
    pub fn grow_with_observer<F>(&self, image: &GrayImage, observer: F) -> RegionResult<Mask>
    where
        F: FnMut(&StepReport) -> ControlFlow<()>,
    {
        if image.is_empty() {
            return Err(RegionError::EmptyImage);
        }

        let seed = image.threshold_above(self.start_threshold);
        if self.stop_threshold >= self.start_threshold {
            if self.options.strict_range {
                return Err(RegionError::InvalidRange {
                    start: self.start_threshold,
                    stop: self.stop_threshold,
                });
            }
            log::warn!(
                "stop threshold {} is not below start threshold {}; returning the seed",
                self.stop_threshold,
                self.start_threshold
            );
            return Ok(seed);
        }

        log::debug!(
            "seed above {}: {} pixels",
            self.start_threshold,
            seed.count()
        );
        descend(image, seed, self.stop_threshold, observer)
    }

    /// Grow from a caller-supplied seed instead of `I > start`.
    pub fn grow_from_seed(&self, image: &GrayImage, seed: Mask) -> RegionResult<Mask> {
        grow_from_seed(image, seed, self.stop_threshold)
    }
}

/// Grow `image` from `I > start` down to `stop`.
pub fn grow_region(
    image: &GrayImage,
    start_threshold: i64,
    stop_threshold: i64,
    options: &GrowOptions,
) -> RegionResult<Mask> {
    RegionGrower::new(start_threshold, stop_threshold)
        .with_options(*options)
        .grow(image)
}

/// Run the threshold descent from an arbitrary seed mask.
///
/// There is no start threshold here, so no range check applies; levels run
/// from the image maximum down to `stop_threshold + 1`.
///
/// # Errors
///
/// Returns [`RegionError::DimensionMismatch`] if `seed` and `image` differ
/// in shape.
pub fn grow_from_seed(image: &GrayImage, seed: Mask, stop_threshold: i64) -> RegionResult<Mask> {
    if image.is_empty() {
        return Err(RegionError::EmptyImage);
    }
    check_shape(image, &seed)?;
    descend(image, seed, stop_threshold, |_| ControlFlow::Continue(()))
}

/// One threshold level as a pure function: the closure of `mask` over the
/// pixels of `image` that are `>= threshold`.
///
/// No level is skipped here; the early-exit shortcut only applies inside a
/// full descent.
pub fn grow_step(mask: &Mask, image: &GrayImage, threshold: u16) -> RegionResult<Mask> {
    check_shape(image, mask)?;
    let mut next = mask.clone();
    grow_level(&mut next, image, threshold, |_| {})?;
    Ok(next)
}

fn check_shape(image: &GrayImage, mask: &Mask) -> RegionResult<()> {
    if image.dimensions() != mask.dimensions() {
        return Err(RegionError::DimensionMismatch {
            expected: image.dimensions(),
            actual: mask.dimensions(),
        });
    }
    Ok(())
}

/// The outer loop: fold [`grow_level`] over the descending thresholds.
fn descend<F>(
    image: &GrayImage,
    mut mask: Mask,
    stop_threshold: i64,
    mut observer: F,
) -> RegionResult<Mask>
where
    F: FnMut(&StepReport) -> ControlFlow<()>,
{
    let Some(max) = image.max_value() else {
        return Err(RegionError::EmptyImage);
    };
    let lowest = stop_threshold.saturating_add(1).max(0);
    if lowest > i64::from(max) {
        return Ok(mask);
    }
    let lowest = lowest as u16;

    let mut area = mask.count();
    if area == 0 {
        // Nothing can touch an empty mask at any level
        log::debug!("empty seed; nothing to grow");
        return Ok(mask);
    }
    let mut unmasked = GrayHistogram::from_unmasked(image, &mask)?;

    for threshold in (lowest..=max).rev() {
        if unmasked.count(threshold) == 0 {
            log::trace!("threshold {}: nothing new at this level", threshold);
            continue;
        }

        let (regions, admitted) =
            grow_level(&mut mask, image, threshold, |v| unmasked.remove(v))?;
        area += admitted;

        let report = StepReport {
            threshold,
            admitted,
            regions,
            area,
        };
        log::debug!(
            "threshold {}: {} regions, {} admitted, area {}",
            threshold,
            regions,
            admitted,
            area
        );
        if observer(&report).is_break() {
            return Err(RegionError::Cancelled { threshold });
        }
    }

    Ok(mask)
}

/// Grow every region of `mask` at `threshold`.
///
/// `on_admit` sees the intensity of every newly admitted pixel. Returns the
/// number of regions and of admitted pixels.
fn grow_level<F>(
    mask: &mut Mask,
    image: &GrayImage,
    threshold: u16,
    mut on_admit: F,
) -> RegionResult<(usize, usize)>
where
    F: FnMut(u16),
{
    let components = find_connected_components(mask, GROWTH_CONNECTIVITY)?;
    let mut admitted = 0;
    for cc in &components {
        admitted += grow_region_in_window(mask, image, cc.bounds, threshold, &mut on_admit)?;
    }
    Ok((components.len(), admitted))
}

/// Grow one region inside its window, enlarging the window while admitted
/// pixels reach an interior edge of it.
fn grow_region_in_window<F>(
    mask: &mut Mask,
    image: &GrayImage,
    bounds: Box,
    threshold: u16,
    on_admit: &mut F,
) -> RegionResult<usize>
where
    F: FnMut(u16),
{
    let (width, height) = image.dimensions();
    let Some(mut window) = bounds.expand(1).clip(width, height) else {
        return Ok(0);
    };
    let mut total = 0;
    let mut margin = 1;

    loop {
        let potential = image.threshold_at_least_in(&window, threshold)?;
        if !potential.any() {
            return Ok(total);
        }

        let mut local = mask.crop(&window)?;
        let mut new_pixels: Vec<(u32, u32)> = Vec::new();
        let mut step = outer_boundary(&local, GROWTH_CONNECTIVITY).and(&potential)?;
        while step.any() {
            new_pixels.extend(step.iter_set());
            local.or_assign(&step)?;
            step = outer_boundary(&local, GROWTH_CONNECTIVITY).and(&potential)?;
        }

        if new_pixels.is_empty() {
            return Ok(total);
        }

        let (wx, wy) = (window.x as u32, window.y as u32);
        mask.paste_or(&local, wx, wy)?;

        let mut reached = Box::from_pixel(wx + new_pixels[0].0, wy + new_pixels[0].1);
        for &(x, y) in &new_pixels {
            let (gx, gy) = (wx + x, wy + y);
            reached.include_pixel(gx, gy);
            if let Some(v) = image.get_pixel(gx, gy) {
                on_admit(v);
            }
        }
        total += new_pixels.len();

        log::trace!(
            "window {:?} at threshold {}: {} admitted",
            window,
            threshold,
            new_pixels.len()
        );

        let touches_interior_edge = (reached.x == window.x && window.x > 0)
            || (reached.y == window.y && window.y > 0)
            || (reached.right() == window.right() && window.right() < width as i32)
            || (reached.bottom() == window.bottom() && window.bottom() < height as i32);
        if !touches_interior_edge {
            return Ok(total);
        }

        match reached.expand(margin).clip(width, height) {
            Some(grown) => window = window.union(&grown),
            None => return Ok(total),
        }
        margin *= 2;
    }
}
