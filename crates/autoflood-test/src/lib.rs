//! autoflood-test - Regression test framework for autoflood
//!
//! Regression tests live in each crate's `tests/*_reg.rs` and share the
//! bookkeeping in [`RegParams`]: every check bumps an index, failures are
//! collected, and [`RegParams::cleanup`] reports the outcome.
//!
//! # Usage
//!
//! ```ignore
//! use autoflood_test::RegParams;
//!
//! let mut rp = RegParams::new("grow");
//! rp.compare_values(4452.0, count as f64, 0.0);
//! rp.compare_masks(&expected, &mask);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to also write every compared mask to
//!   the regout directory for visual inspection

mod error;
mod params;
pub mod reference;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // autoflood-test is at crates/autoflood-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
