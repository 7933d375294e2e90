//! Package metadata types.
//!
//! Defines the registry metadata kept for one resolved package.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registry metadata for one resolved package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    /// `;`-joined license identifiers, empty when unknown
    pub license: String,
    /// Normalized source repository URL, empty when unknown
    pub repository_url: String,
    /// Registry fields with no typed counterpart, passed through as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PackageInfo {
    /// Create package metadata with required fields
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            license: String::new(),
            repository_url: String::new(),
            extra: Map::new(),
        }
    }

    /// Set the license string
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = license.into();
        self
    }

    /// Set the repository URL
    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = url.into();
        self
    }
}
