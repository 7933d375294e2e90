//! Configuration loading for depinfo
//!
//! Settings are assembled once at startup from several layers (built-in
//! defaults, a global TOML file, a project `depinfo.toml`, the `SOCKET_CONFIG`
//! and `SOCKET_API` environment variables, and command-line flags) and then
//! passed explicitly to whatever needs them.

pub mod layer;
pub mod merge;
pub mod settings;

// Re-export main types
pub use layer::{ApiLayer, OptionsLayer, SettingsLayer};
pub use merge::{load_from_file, ConfigLayering, ConfigLoader, ConfigSource, API_ENV_VAR, OPTIONS_ENV_VAR, PROJECT_CONFIG_FILE};
pub use settings::{ApiSettings, ConfigOverrides, Options, Settings};

use depinfo_core::error::DepinfoError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, DepinfoError>;
