//! Error types for autoflood-filter

use thiserror::Error;

/// Errors that can occur during intensity normalization
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] autoflood_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Empty image
    #[error("empty image: no pixels to process")]
    EmptyImage,
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
