//! Report rows joining dependency and package records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DependencyRecord, PackageInfo};

/// Column headers, in row order
pub const REPORT_COLUMNS: [&str; 6] = ["repo", "branch", "package", "pkg_version", "license", "github"];

/// One line of the final report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub repository: String,
    pub branch: String,
    pub package_name: String,
    pub package_version: String,
    pub license: String,
    pub repository_url: String,
}

impl ReportRow {
    /// Join a dependency with one package variant resolved under its name
    pub fn join(dependency: &DependencyRecord, package: &PackageInfo) -> Self {
        Self {
            repository: dependency.repository.clone(),
            branch: dependency.branch.clone(),
            package_name: package.name.clone(),
            package_version: package.version.clone(),
            license: package.license.clone(),
            repository_url: package.repository_url.clone(),
        }
    }

    /// Field values in `REPORT_COLUMNS` order
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.repository,
            &self.branch,
            &self.package_name,
            &self.package_version,
            &self.license,
            &self.repository_url,
        ]
    }
}

/// File format of the written report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}', expected csv or json", other)),
        }
    }
}
