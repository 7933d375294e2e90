//! Dependency records fetched from the inventory service.
//!
//! A record identifies one package as used by one repository and branch.

use serde::{Deserialize, Deserializer, Serialize};

/// Dependency as tracked by the inventory service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub name: String,
    pub version: String,
    /// Package ecosystem, e.g. "npm" or "pypi"
    #[serde(rename = "type", default)]
    pub ecosystem: String,
    #[serde(default, deserialize_with = "deserialize_namespace")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub repository: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
}

impl DependencyRecord {
    /// Create a record with just a name and version
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ecosystem: String::new(),
            namespace: None,
            repository: String::new(),
            branch: String::new(),
            id: String::new(),
        }
    }

    /// Set the repository and branch this dependency was found in
    pub fn in_repository(mut self, repository: impl Into<String>, branch: impl Into<String>) -> Self {
        self.repository = repository.into();
        self.branch = branch.into();
        self
    }

    /// Set the namespace, applying the usual normalization
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = normalize_namespace(Some(namespace.into()));
        self
    }

    /// `name@version`, the form used in log lines
    pub fn spec(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

/// The inventory service reports "no namespace" as either `""` or a lone `"`
pub fn normalize_namespace(namespace: Option<String>) -> Option<String> {
    namespace.filter(|ns| !ns.is_empty() && ns != "\"")
}

fn deserialize_namespace<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(normalize_namespace(raw))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Number(n)) => n.to_string(),
        Some(RawId::Text(s)) => s,
        None => String::new(),
    };
    Ok(id)
}
