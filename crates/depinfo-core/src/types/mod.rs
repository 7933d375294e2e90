//! Core data types for dependency resolution.
//!
//! This module provides the records passed between the pipeline stages:
//! - Dependency records fetched from the inventory service
//! - Package metadata resolved from the registry
//! - Joined report rows handed to the report writer

pub mod dependency;
pub mod package;
pub mod report;

// Re-export all public types
pub use dependency::DependencyRecord;
pub use package::PackageInfo;
pub use report::{OutputFormat, ReportRow, REPORT_COLUMNS};
