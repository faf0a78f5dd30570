//! GrayImage - The intensity image container
//!
//! A single-channel image of unsigned samples, stored row-major as `u16`
//! regardless of the declared depth. The image is immutable once built and
//! uses `Arc` for cheap cloning, so the normalized intensity array can be
//! shared by every stage that reads it.

use crate::box_::Box;
use crate::error::{Error, Result};
use crate::mask::Mask;
use std::sync::Arc;

/// Sample depth (bits per sample)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 8-bit grayscale
    Bit8 = 8,
    /// 16-bit grayscale
    Bit16 = 16,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if `bits` is not 8 or 16.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(PixelDepth::Bit8),
            16 => Ok(PixelDepth::Bit16),
            _ => Err(Error::UnsupportedDepth(bits)),
        }
    }

    /// Get the number of bits per sample.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum sample value representable at this depth.
    pub fn max_value(self) -> u16 {
        match self {
            PixelDepth::Bit8 => u8::MAX as u16,
            PixelDepth::Bit16 => u16::MAX,
        }
    }
}

#[derive(Debug)]
struct GrayData {
    width: u32,
    height: u32,
    depth: PixelDepth,
    data: Vec<u16>,
}

/// Single-channel intensity image
///
/// # Examples
///
/// ```
/// use autoflood_core::{GrayImage, PixelDepth};
///
/// let img = GrayImage::from_fn(4, 3, PixelDepth::Bit8, |x, y| (x + y) as u16).unwrap();
/// assert_eq!(img.get_pixel(3, 2), Some(5));
/// assert_eq!(img.max_value(), Some(5));
/// ```
#[derive(Debug, Clone)]
pub struct GrayImage {
    inner: Arc<GrayData>,
}

impl GrayImage {
    /// Create a zero-filled image.
    ///
    /// Zero width or height is allowed; such an image has no pixels and
    /// every pixel-consuming operation downstream rejects it.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Self {
        let data = vec![0u16; width as usize * height as usize];
        Self::from_parts(width, height, depth, data)
    }

    /// Wrap an existing row-major sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `data.len() != width * height`
    /// and [`Error::SampleOutOfRange`] if a sample exceeds the depth maximum.
    pub fn from_vec(width: u32, height: u32, depth: PixelDepth, data: Vec<u16>) -> Result<Self> {
        if data.len() != width as usize * height as usize {
            return Err(Error::InvalidDimension {
                width,
                height,
                len: data.len(),
            });
        }
        let max = depth.max_value();
        if let Some(&value) = data.iter().find(|&&v| v > max) {
            return Err(Error::SampleOutOfRange {
                value,
                max,
                bits: depth.bits(),
            });
        }
        Ok(Self::from_parts(width, height, depth, data))
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, depth: PixelDepth, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> u16,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::from_vec(width, height, depth, data)
    }

    fn from_parts(width: u32, height: u32, depth: PixelDepth, data: Vec<u16>) -> Self {
        Self {
            inner: Arc::new(GrayData {
                width,
                height,
                depth,
                data,
            }),
        }
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get the sample depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// True if the image has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.data.is_empty()
    }

    /// Get raw access to the row-major samples.
    #[inline]
    pub fn data(&self) -> &[u16] {
        &self.inner.data
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u16] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Get a sample, or `None` outside the image.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u16> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        let idx = y as usize * self.inner.width as usize + x as usize;
        Some(self.inner.data[idx])
    }

    /// Largest sample in the image, `None` for an empty image.
    pub fn max_value(&self) -> Option<u16> {
        self.inner.data.iter().copied().max()
    }

    /// Mask of pixels strictly above `threshold`.
    ///
    /// `threshold` is signed so that a negative value selects every pixel.
    pub fn threshold_above(&self, threshold: i64) -> Mask {
        let data = self
            .inner
            .data
            .iter()
            .map(|&v| i64::from(v) > threshold)
            .collect();
        Mask::from_parts(self.inner.width, self.inner.height, data)
    }

    /// Mask of pixels `>= threshold` inside `window`, sized to the window.
    ///
    /// # Errors
    ///
    /// Returns an error if `window` is not fully inside the image.
    pub fn threshold_at_least_in(&self, window: &Box, threshold: u16) -> Result<Mask> {
        self.check_window(window)?;
        let (x0, y0) = (window.x as u32, window.y as u32);
        let (w, h) = (window.w as u32, window.h as u32);
        let mut data = Vec::with_capacity(w as usize * h as usize);
        for y in y0..y0 + h {
            let row = self.row(y);
            data.extend(
                row[x0 as usize..(x0 + w) as usize]
                    .iter()
                    .map(|&v| v >= threshold),
            );
        }
        Ok(Mask::from_parts(w, h, data))
    }

    /// Copy the rectangle `window` into a new image of the same depth.
    ///
    /// # Errors
    ///
    /// Returns an error if `window` is not fully inside the image.
    pub fn crop(&self, window: &Box) -> Result<GrayImage> {
        self.check_window(window)?;
        let (x0, y0) = (window.x as usize, window.y as usize);
        let (w, h) = (window.w as usize, window.h as usize);
        let mut data = Vec::with_capacity(w * h);
        for y in y0..y0 + h {
            data.extend_from_slice(&self.row(y as u32)[x0..x0 + w]);
        }
        Ok(Self::from_parts(w as u32, h as u32, self.inner.depth, data))
    }

    fn check_window(&self, window: &Box) -> Result<()> {
        if window.w < 0
            || window.h < 0
            || !Box::full(self.inner.width, self.inner.height).contains_box(window)
        {
            return Err(Error::InvalidParameter(format!(
                "window {:?} outside {}x{} image",
                window, self.inner.width, self.inner.height
            )));
        }
        Ok(())
    }
}
