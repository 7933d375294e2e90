//! Inventory API request and response types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use depinfo_core::DependencyRecord;

/// Body of `POST /dependencies/search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub limit: usize,
    pub offset: usize,
}

/// Response of `POST /dependencies/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Matching dependencies; absent when there are none
    #[serde(default)]
    pub rows: Option<Vec<DependencyRecord>>,
}

/// Organization visible to the API key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
}

/// Response of `GET /organizations`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationsResponse {
    /// Organizations keyed by id
    #[serde(default)]
    pub organizations: BTreeMap<String, Organization>,
}

/// Response of `POST /dependencies/upload`
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub id: String,
}
