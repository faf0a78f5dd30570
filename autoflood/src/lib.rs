//! autoflood - Threshold-descent region growing
//!
//! Segments a region of interest in a large intensity image by growing a
//! mask outward from the pixels above a high start threshold, admitting
//! neighbouring pixels while the threshold is lowered to a stop threshold.
//!
//! The pipeline reads one channel of an acquisition, stretches its
//! intensities between two percentiles, grows the region and writes the
//! mask:
//!
//! ```no_run
//! use autoflood::{SegmentOptions, segment_file};
//!
//! let options = SegmentOptions::new(40000, 12000);
//! let mask = segment_file("acquisition.ome.tif", 2, &options).unwrap();
//! autoflood::io::write_mask(&mask, "mask.tif").unwrap();
//! ```

mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use autoflood_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use autoflood_filter as filter;
pub use autoflood_io as io;
pub use autoflood_region as region;

pub use pipeline::{PipelineError, PipelineResult, SegmentOptions, segment_file, segment_image};
