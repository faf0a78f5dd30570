//! Error types for autoflood-region

use thiserror::Error;

/// Errors that can occur during region growing
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] autoflood_core::Error),

    /// Stop threshold not below the start threshold with strict checking on
    #[error("invalid threshold range: stop {stop} must be below start {start}")]
    InvalidRange { start: i64, stop: i64 },

    /// Empty image
    #[error("empty image: no pixels to process")]
    EmptyImage,

    /// Seed mask and image shapes differ
    #[error("seed mask is {actual:?} but image is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// A step observer stopped the run
    #[error("growth cancelled after threshold {threshold}")]
    Cancelled { threshold: u16 },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
