//! Box - Rectangle regions
//!
//! Axis-aligned rectangles used for component bounding boxes and for the
//! working windows of the growth engine.

use crate::error::{Error, Result};

/// A rectangle region
///
/// `x`/`y` is the top-left corner; `right()` and `bottom()` are exclusive.
/// A bounding box written as `(min_row, min_col, max_row, max_col)` with
/// inclusive maxima is `(y, x, bottom() - 1, right() - 1)`.
///
/// Coordinates are signed so that a box may be expanded past the image
/// origin before being clipped back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate (column)
    pub x: i32,
    /// Top y coordinate (row)
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a 1x1 box covering a single pixel
    pub const fn from_pixel(x: u32, y: u32) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
            w: 1,
            h: 1,
        }
    }

    /// Box covering a whole `width` x `height` image
    pub const fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            w: width as i32,
            h: height as i32,
        }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Check if this box contains another box
    pub fn contains_box(&self, other: &Box) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Compute the union (bounding box) of two boxes
    pub fn union(&self, other: &Box) -> Box {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Box {
            x,
            y,
            w: right - x,
            h: bottom - y,
        }
    }

    /// Grow the box so that it contains the pixel `(x, y)`
    pub fn include_pixel(&mut self, x: u32, y: u32) {
        *self = self.union(&Box::from_pixel(x, y));
    }

    /// Expand the box by a margin on all sides
    pub fn expand(&self, margin: i32) -> Box {
        Box {
            x: self.x - margin,
            y: self.y - margin,
            w: self.w + 2 * margin,
            h: self.h + 2 * margin,
        }
    }

    /// Clip the box to fit within `0..width` x `0..height`
    ///
    /// Returns `None` if nothing of the box lies inside.
    pub fn clip(&self, width: u32, height: u32) -> Option<Box> {
        let x = self.x.max(0);
        let y = self.y.max(0);
        let right = self.right().min(width as i32);
        let bottom = self.bottom().min(height as i32);

        if x < right && y < bottom {
            Some(Box {
                x,
                y,
                w: right - x,
                h: bottom - y,
            })
        } else {
            None
        }
    }
}
