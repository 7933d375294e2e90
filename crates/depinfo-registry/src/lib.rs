//! npm registry client for depinfo
//!
//! This crate performs single package lookups against the npm registry and
//! classifies every response into a [`LookupOutcome`]. Nothing here retries or
//! sleeps; that is the resolution policy's job.

pub mod api;
pub mod client;
pub mod lookup;
pub mod normalize;

// Re-export main types
pub use api::{LicenseEntry, LicenseField, LicensesField, RegistryPayload, RepositoryField};
pub use client::{RegistryClient, DEFAULT_REGISTRY_URL};
pub use lookup::{LookupOutcome, PackageLookup, SERVICE_UNAVAILABLE_WAIT};
pub use normalize::{join_licenses, normalize_repository_url};

use depinfo_core::error::DepinfoError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, DepinfoError>;
