//! autoflood-region - Region growing for autoflood
//!
//! This crate provides:
//!
//! - **Connected component analysis** - Finding and labeling connected regions
//! - **Outer boundaries** - The ring of pixels just outside a mask
//! - **Threshold-descent growth** - Flood-fill-like growth of a seed mask
//!   while an admission threshold is lowered level by level
//!
//! # Examples
//!
//! ## Finding connected components
//!
//! ```
//! use autoflood_core::Mask;
//! use autoflood_region::{ConnectivityType, find_connected_components};
//!
//! let mask = Mask::from_fn(100, 100, |x, y| matches!((x, y), (10, 10) | (11, 10) | (50, 50)));
//! let components = find_connected_components(&mask, ConnectivityType::FourWay).unwrap();
//! assert_eq!(components.len(), 2);
//! assert_eq!(components[0].pixel_count, 2);
//! ```
//!
//! ## Growing a region
//!
//! ```
//! use autoflood_core::{GrayImage, PixelDepth};
//! use autoflood_region::{GrowOptions, grow_region};
//!
//! let img = GrayImage::from_fn(9, 9, PixelDepth::Bit8, |x, y| {
//!     let d = x.abs_diff(4).max(y.abs_diff(4)) as u16;
//!     200 - 40 * d
//! })
//! .unwrap();
//! let mask = grow_region(&img, 150, 100, &GrowOptions::default()).unwrap();
//! // Seed is the 3x3 core (200, 160); the 120 ring joins, 80 does not
//! assert_eq!(mask.count(), 25);
//! ```

pub mod boundary;
pub mod conncomp;
pub mod error;
pub mod grow;

// Re-export core types
pub use autoflood_core;

pub use error::{RegionError, RegionResult};

pub use boundary::outer_boundary;
pub use conncomp::{
    ConnectedComponent, ConnectivityType, LabelMap, find_connected_components,
    label_connected_components,
};
pub use grow::{
    GROWTH_CONNECTIVITY, GrowOptions, RegionGrower, StepReport, grow_from_seed, grow_region,
    grow_step,
};
