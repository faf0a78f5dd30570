//! Mask - Binary admission masks
//!
//! A `Mask` has the shape of the intensity image it belongs to; `true`
//! marks an admitted pixel. Working copies are cut out with [`Mask::crop`]
//! and merged back with [`Mask::paste_or`], which only ever sets bits.

use crate::box_::Box;
use crate::error::{Error, Result};

/// Binary mask, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl Mask {
    /// Create an all-false mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_parts(width, height, vec![false; width as usize * height as usize])
    }

    /// Wrap a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<bool>) -> Result<Self> {
        if data.len() != width as usize * height as usize {
            return Err(Error::InvalidDimension {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self::from_parts(width, height, data))
    }

    /// Build a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::from_parts(width, height, data)
    }

    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<bool>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    /// Get the mask width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the mask height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major pixel values.
    #[inline]
    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Get a pixel, or `None` outside the mask.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[self.index(x, y)])
    }

    /// True if `(x, y)` is inside the mask and set.
    #[inline]
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        self.get(x, y).unwrap_or(false)
    }

    /// Set a pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] outside the mask.
    pub fn set(&mut self, x: u32, y: u32, value: bool) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        self.data[idx] = value;
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// True if at least one pixel is set.
    pub fn any(&self) -> bool {
        self.data.iter().any(|&v| v)
    }

    /// Coordinates of every set pixel, in raster order.
    pub fn iter_set(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let w = self.width as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .map(move |(i, _)| ((i % w) as u32, (i / w) as u32))
    }

    /// Smallest box holding every set pixel, `None` if nothing is set.
    pub fn bounding_box(&self) -> Option<Box> {
        let mut iter = self.iter_set();
        let (x, y) = iter.next()?;
        let mut bounds = Box::from_pixel(x, y);
        for (x, y) in iter {
            bounds.include_pixel(x, y);
        }
        Some(bounds)
    }

    fn check_same_size(&self, other: &Mask) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    /// `self |= other`
    pub fn or_assign(&mut self, other: &Mask) -> Result<()> {
        self.check_same_size(other)?;
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a |= b;
        }
        Ok(())
    }

    /// `self & other` as a new mask
    pub fn and(&self, other: &Mask) -> Result<Mask> {
        self.check_same_size(other)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| a && b)
            .collect();
        Ok(Self::from_parts(self.width, self.height, data))
    }

    /// True if every pixel set in `self` is also set in `other`.
    pub fn is_subset_of(&self, other: &Mask) -> bool {
        self.dimensions() == other.dimensions()
            && self.data.iter().zip(&other.data).all(|(&a, &b)| !a || b)
    }

    /// Copy the rectangle `window` into a new mask.
    ///
    /// # Errors
    ///
    /// Returns an error if `window` is not fully inside the mask.
    pub fn crop(&self, window: &Box) -> Result<Mask> {
        if window.w < 0 || window.h < 0 || !Box::full(self.width, self.height).contains_box(window)
        {
            return Err(Error::InvalidParameter(format!(
                "window {:?} outside {}x{} mask",
                window, self.width, self.height
            )));
        }
        let (x0, y0) = (window.x as usize, window.y as usize);
        let (w, h) = (window.w as usize, window.h as usize);
        let stride = self.width as usize;
        let mut data = Vec::with_capacity(w * h);
        for y in y0..y0 + h {
            let start = y * stride + x0;
            data.extend_from_slice(&self.data[start..start + w]);
        }
        Ok(Self::from_parts(w as u32, h as u32, data))
    }

    /// OR `src` into `self` with its top-left corner at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `src` does not fit at that offset.
    pub fn paste_or(&mut self, src: &Mask, x: u32, y: u32) -> Result<()> {
        let target = Box::new_unchecked(x as i32, y as i32, src.width as i32, src.height as i32);
        if !Box::full(self.width, self.height).contains_box(&target) {
            return Err(Error::InvalidParameter(format!(
                "{}x{} mask at ({}, {}) does not fit in {}x{}",
                src.width, src.height, x, y, self.width, self.height
            )));
        }
        let stride = self.width as usize;
        let w = src.width as usize;
        for (row, src_row) in src.data.chunks(w.max(1)).enumerate() {
            let start = (y as usize + row) * stride + x as usize;
            for (dst, &s) in self.data[start..start + w].iter_mut().zip(src_row) {
                *dst |= s;
            }
        }
        Ok(())
    }
}
