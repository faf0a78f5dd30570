//! Error types for autoflood-core
//!
//! Provides a unified error type for the image, mask, rectangle and
//! histogram containers. Each variant captures enough context for
//! diagnostics without exposing internal layout details.

use thiserror::Error;

/// autoflood-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions, or a sample buffer whose length does not
    /// match them
    #[error("invalid image dimensions: {width}x{height} ({len} samples)")]
    InvalidDimension { width: u32, height: u32, len: usize },

    /// Two arrays that must share a shape do not
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Index out of bounds
    #[error("index out of bounds: ({x}, {y}) in {width}x{height}")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Sample value too large for the declared depth
    #[error("sample value {value} exceeds {max} for {bits} bpp")]
    SampleOutOfRange { value: u16, max: u16, bits: u32 },

    /// Unsupported sample depth
    #[error("unsupported sample depth: {0} bpp")]
    UnsupportedDepth(u32),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
