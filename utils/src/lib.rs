//! Shared infrastructure utilities for typolens.
//!
//! - **`diff`**: added-line detection between document versions

pub mod diff;

pub use diff::{compute_diff_stats, find_differences};
