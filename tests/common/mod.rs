//! Common utilities for integration tests

pub mod fixtures;
pub mod test_helpers;

// Re-export commonly used items
pub use fixtures::{linspace, p2d_solution, spm_solution, P2D_CELLS};
pub use test_helpers::{assert_malformed, assert_unsupported, temp_path};
