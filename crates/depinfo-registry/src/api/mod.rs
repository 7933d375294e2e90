//! npm registry API response types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use depinfo_core::PackageInfo;

use crate::normalize::{join_licenses, normalize_repository_url};

/// Package document returned by `/{name}/{version}` or `/{name}`
///
/// Only the fields the report needs are typed; everything else lands in
/// `extra` and is carried through to [`PackageInfo::extra`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryPayload {
    /// Package name
    pub name: Option<String>,
    /// Version string (absent on package-level documents)
    pub version: Option<String>,
    /// SPDX expression or legacy license object
    pub license: Option<LicenseField>,
    /// Legacy list of license objects
    pub licenses: Option<LicensesField>,
    /// Repository information
    pub repository: Option<RepositoryField>,
    /// All other registry fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Scalar `license` field
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LicenseField {
    /// SPDX identifier or expression
    Spdx(String),
    /// Legacy `{ "type": ..., "url": ... }` object
    Detailed {
        #[serde(rename = "type")]
        license_type: Option<String>,
        url: Option<String>,
    },
    /// Anything else the registry sends
    Other(Value),
}

/// Entry of the legacy `licenses` list
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LicenseEntry {
    /// Bare identifier
    Spdx(String),
    /// `{ "type": ..., "url": ... }` object
    Detailed {
        #[serde(rename = "type")]
        license_type: Option<String>,
        url: Option<String>,
    },
    /// Anything else the registry sends
    Other(Value),
}

/// Legacy `licenses` field; only the list form is meaningful
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LicensesField {
    /// List of license entries
    List(Vec<LicenseEntry>),
    /// Single object, bare string, or anything else
    Other(Value),
}

/// Repository information
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RepositoryField {
    /// Simple URL string
    Url(String),
    /// Detailed repository object
    Detailed {
        #[serde(rename = "type")]
        repo_type: Option<String>,
        url: Option<String>,
        directory: Option<String>,
    },
    /// Anything else the registry sends
    Other(Value),
}

impl LicenseField {
    /// License identifier, if one can be read
    pub fn identifier(&self) -> Option<&str> {
        match self {
            LicenseField::Spdx(id) => Some(id),
            LicenseField::Detailed { license_type, .. } => license_type.as_deref(),
            LicenseField::Other(_) => None,
        }
    }
}

impl LicenseEntry {
    /// License identifier, if one can be read
    pub fn identifier(&self) -> Option<&str> {
        match self {
            LicenseEntry::Spdx(id) => Some(id),
            LicenseEntry::Detailed { license_type, .. } => license_type.as_deref(),
            LicenseEntry::Other(_) => None,
        }
    }
}

impl RepositoryField {
    /// Raw repository URL before normalization
    pub fn raw_url(&self) -> &str {
        match self {
            RepositoryField::Url(url) => url,
            RepositoryField::Detailed { url, .. } => url.as_deref().unwrap_or(""),
            RepositoryField::Other(_) => "",
        }
    }
}

impl RegistryPayload {
    /// License string for the report
    ///
    /// A `licenses` list wins over the scalar `license` field; any other
    /// shape of `licenses` is ignored.
    pub fn license(&self) -> String {
        if let Some(LicensesField::List(entries)) = &self.licenses {
            return join_licenses(entries.iter().map(|entry| entry.identifier().unwrap_or("")));
        }
        self.license
            .as_ref()
            .and_then(LicenseField::identifier)
            .unwrap_or("")
            .to_string()
    }

    /// Normalized repository URL for the report
    pub fn repository_url(&self) -> String {
        self.repository
            .as_ref()
            .map(|repo| normalize_repository_url(repo.raw_url()))
            .unwrap_or_default()
    }

    /// Convert into package metadata, filling gaps from the request
    pub fn into_package(self, requested_name: &str, requested_version: &str) -> PackageInfo {
        let license = self.license();
        let repository_url = self.repository_url();

        PackageInfo {
            name: self.name.unwrap_or_else(|| requested_name.to_string()),
            version: self.version.unwrap_or_else(|| requested_version.to_string()),
            license,
            repository_url,
            extra: self.extra,
        }
    }
}
