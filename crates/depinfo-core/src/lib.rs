//! # depinfo-core
//!
//! Core types and utilities shared across all depinfo crates.
//!
//! This crate provides:
//! - DependencyRecord, PackageInfo and ReportRow, the records that flow
//!   through the resolution pipeline
//! - DepinfoError enum for unified error handling
//! - Utility functions for common operations
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (DependencyRecord, PackageInfo, etc.)
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{DepinfoError, DepinfoResult};
pub use types::{DependencyRecord, OutputFormat, PackageInfo, ReportRow, REPORT_COLUMNS};
