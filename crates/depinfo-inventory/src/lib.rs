//! Dependency inventory service client for depinfo
//!
//! Talks to the Socket.dev API: searching the dependencies it tracks,
//! listing organizations, and uploading manifest files found on disk.

pub mod api;
pub mod client;
pub mod manifest;

// Re-export main types
pub use api::{Organization, SearchRequest, SearchResponse, UploadResponse};
pub use client::{InventoryClient, DEFAULT_INVENTORY_URL};
pub use manifest::{find_package_files, DEFAULT_PACKAGE_FILES};

use depinfo_core::error::DepinfoError;

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, DepinfoError>;
