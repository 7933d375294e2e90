//! Utility functions and helpers.
//!
//! Common functionality used across multiple depinfo crates.

pub mod path;

// Re-export commonly used utilities
pub use path::{file_name_of, to_forward_slashes};
