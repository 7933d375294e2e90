//! Resolved settings handed to the rest of the program

use std::time::Duration;

use camino::Utf8PathBuf;
use serde::Serialize;

use depinfo_core::error::DepinfoError;
use depinfo_core::OutputFormat;
use crate::ConfigResult;

/// Everything the program needs to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub options: Options,
}

/// Inventory service credentials and upload target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiSettings {
    /// API key, used as the basic-auth user name
    #[serde(skip_serializing)]
    pub key: String,
    /// Repository name used when uploading manifests
    pub repo: Option<String>,
    /// Branch name used when uploading manifests
    pub branch: String,
    /// Inventory API root; the client's default when unset
    pub url: Option<String>,
}

impl ApiSettings {
    /// Branch uploads are filed under unless configured
    pub const DEFAULT_BRANCH: &'static str = "dependencies";
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            key: String::new(),
            repo: None,
            branch: Self::DEFAULT_BRANCH.to_string(),
            url: None,
        }
    }
}

/// Pipeline and output options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Options {
    /// Where the report is written
    pub output_file: Utf8PathBuf,
    pub output_format: OutputFormat,
    /// Manifest names looked for when uploading
    pub package_files: Vec<String>,
    /// Seconds to pause after each dependency
    pub wait_time: u64,
    /// Retry budget per dependency, counted in retries
    pub max_wait: u32,
    /// Maximum number of dependencies fetched from the inventory
    pub limit: usize,
    /// Inventory page size; everything in one request when unset
    pub page_size: Option<usize>,
    /// Registry root; the client's default when unset
    pub registry_url: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output_file: Utf8PathBuf::from("dependency_info.csv"),
            output_format: OutputFormat::Csv,
            package_files: vec!["package.json".to_string(), "requirements.txt".to_string()],
            wait_time: 0,
            max_wait: 20,
            limit: 1000,
            page_size: None,
            registry_url: None,
        }
    }
}

impl Options {
    /// Pause inserted between dependencies
    pub fn inter_request_delay(&self) -> Duration {
        Duration::from_secs(self.wait_time)
    }
}

/// Values given on the command line; `None` leaves the lower layers alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub output_file: Option<Utf8PathBuf>,
    pub output_format: Option<OutputFormat>,
    pub wait_time: Option<u64>,
    pub max_wait: Option<u32>,
    pub limit: Option<usize>,
    pub page_size: Option<usize>,
    pub registry_url: Option<String>,
}

impl ConfigOverrides {
    /// Whether no flag was given
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Settings {
    /// Check the invariants the pipeline relies on
    pub fn validate(&self) -> ConfigResult<()> {
        if self.api.key.is_empty() {
            return Err(DepinfoError::config_missing("SOCKET_API"));
        }

        if self.options.limit == 0 {
            return Err(DepinfoError::ConfigValidation {
                field: "limit".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.options.page_size == Some(0) {
            return Err(DepinfoError::ConfigValidation {
                field: "page_size".to_string(),
                reason: "must be greater than zero when set".to_string(),
            });
        }

        if self.options.output_file.as_str().is_empty() {
            return Err(DepinfoError::ConfigValidation {
                field: "output_file".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
