//! autoflood-filter - Intensity normalization
//!
//! Provides the percentile contrast stretch that maps raw acquisition
//! samples onto the full range of their depth before thresholds are
//! applied.

mod error;
pub mod rescale;

pub use error::{FilterError, FilterResult};
pub use rescale::{RescaleOptions, percentile_range, rescale_intensity, rescale_range};
