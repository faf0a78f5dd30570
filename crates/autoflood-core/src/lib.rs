//! autoflood-core - Basic data structures for region growing
//!
//! This crate provides the containers shared by every stage of the
//! segmenter:
//!
//! - [`GrayImage`] - Immutable single-channel intensity image (8 or 16 bpp)
//! - [`Mask`] - Binary admission mask with crop / OR-paste support
//! - [`Box`] - Rectangle regions (bounding boxes and working windows)
//! - [`GrayHistogram`] - Per-value counts with percentile queries

pub mod box_;
pub mod error;
pub mod histogram;
pub mod image;
pub mod mask;

pub use box_::Box;
pub use error::{Error, Result};
pub use histogram::GrayHistogram;
pub use image::{GrayImage, PixelDepth};
pub use mask::Mask;
