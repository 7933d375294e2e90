//! Configuration layering, file discovery, and environment overrides

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use depinfo_core::error::DepinfoError;
use crate::layer::{ApiLayer, OptionsLayer, SettingsLayer};
use crate::settings::{ApiSettings, ConfigOverrides, Options, Settings};
use crate::ConfigResult;

/// Environment variable holding the options JSON object
pub const OPTIONS_ENV_VAR: &str = "SOCKET_CONFIG";

/// Environment variable holding the API JSON object
pub const API_ENV_VAR: &str = "SOCKET_API";

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "depinfo.toml";

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
    /// Explicit project config file, replacing the upward search
    config_path: Option<Utf8PathBuf>,
    /// Whether `~/.depinfo/config.toml` is consulted
    use_global: bool,
}

/// Ordered stack of configuration layers
#[derive(Debug, Default)]
pub struct ConfigLayering {
    layers: Vec<(ConfigSource, SettingsLayer)>,
}

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in defaults
    Defaults,
    /// Global config file
    Global(Utf8PathBuf),
    /// Project depinfo.toml file
    Project(Utf8PathBuf),
    /// Environment variable
    Environment(String),
    /// CLI flag
    CommandLine,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Defaults => write!(f, "defaults"),
            ConfigSource::Global(path) => write!(f, "global config {}", path),
            ConfigSource::Project(path) => write!(f, "project config {}", path),
            ConfigSource::Environment(name) => write!(f, "environment variable {}", name),
            ConfigSource::CommandLine => write!(f, "command line"),
        }
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self {
            cwd,
            config_path: None,
            use_global: true,
        }
    }

    /// Use this file as the project configuration
    pub fn with_config_path(mut self, path: Option<Utf8PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Skip the global configuration file
    pub fn without_global(mut self) -> Self {
        self.use_global = false;
        self
    }

    /// Load and validate settings from every layer
    ///
    /// Reads the process environment; see [`ConfigLoader::load_with_env`].
    pub async fn load(&self, overrides: ConfigOverrides) -> ConfigResult<(Settings, Vec<ConfigSource>)> {
        self.load_with_env(overrides, |name| std::env::var(name).ok()).await
    }

    /// Load and validate settings, reading environment variables through `env`
    pub async fn load_with_env<F>(
        &self,
        overrides: ConfigOverrides,
        env: F,
    ) -> ConfigResult<(Settings, Vec<ConfigSource>)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut layering = ConfigLayering::new();

        if self.use_global {
            if let Some((layer, source)) = self.load_global_config().await? {
                layering.push(source, layer);
            }
        }

        if let Some((layer, source)) = self.load_project_config().await? {
            layering.push(source, layer);
        }

        for (source, layer) in ConfigLayering::collect_env_overrides(env)? {
            layering.push(source, layer);
        }

        if !overrides.is_empty() {
            layering.push(ConfigSource::CommandLine, overrides.into());
        }

        let (settings, sources) = layering.merge();
        settings.validate()?;
        Ok((settings, sources))
    }

    /// Load the project configuration file, if there is one
    pub async fn load_project_config(&self) -> ConfigResult<Option<(SettingsLayer, ConfigSource)>> {
        // An explicit path must exist
        if let Some(path) = &self.config_path {
            let layer = load_from_file(path).await?;
            return Ok(Some((layer, ConfigSource::Project(path.clone()))));
        }

        let path = self.resolve_config_path(PROJECT_CONFIG_FILE)?;
        if path.exists() {
            let layer = load_from_file(&path).await?;
            return Ok(Some((layer, ConfigSource::Project(path))));
        }

        Ok(None)
    }

    /// Find configuration file in project (walks up directory tree)
    pub fn resolve_config_path(&self, filename: &str) -> ConfigResult<Utf8PathBuf> {
        let mut current = self.cwd.as_path();

        loop {
            let config_path = current.join(filename);
            if config_path.exists() {
                return Ok(config_path);
            }

            // Move up one directory
            if let Some(parent) = current.parent() {
                current = parent;
            } else {
                // Reached filesystem root
                break;
            }
        }

        // Return path in current directory even if it doesn't exist
        Ok(self.cwd.join(filename))
    }

    /// Load global configuration
    pub async fn load_global_config(&self) -> ConfigResult<Option<(SettingsLayer, ConfigSource)>> {
        let Some(home_dir) = dirs::home_dir() else {
            debug!("No home directory, skipping global config");
            return Ok(None);
        };

        let global_config_path = Utf8PathBuf::try_from(home_dir)
            .map_err(|e| DepinfoError::ConfigValidation {
                field: "home_dir".to_string(),
                reason: format!("Invalid home directory path: {}", e),
            })?
            .join(".depinfo")
            .join("config.toml");

        if global_config_path.exists() {
            let layer = load_from_file(&global_config_path).await?;
            Ok(Some((layer, ConfigSource::Global(global_config_path))))
        } else {
            Ok(None)
        }
    }
}

impl ConfigLayering {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer above every layer pushed so far
    pub fn push(&mut self, source: ConfigSource, layer: SettingsLayer) {
        self.layers.push((source, layer));
    }

    /// Apply every layer over the defaults, lowest precedence first
    pub fn merge(self) -> (Settings, Vec<ConfigSource>) {
        let mut settings = Settings {
            api: ApiSettings::default(),
            options: Options::default(),
        };
        let mut sources = vec![ConfigSource::Defaults];

        for (source, layer) in self.layers {
            debug!("Applying configuration from {}", source);
            layer.apply_to(&mut settings);
            sources.push(source);
        }

        (settings, sources)
    }

    /// Read `SOCKET_CONFIG` and `SOCKET_API` through `env`
    ///
    /// Unset variables contribute nothing; set but unparsable ones are errors.
    pub fn collect_env_overrides<F>(env: F) -> ConfigResult<Vec<(ConfigSource, SettingsLayer)>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut layers = Vec::new();

        match env(OPTIONS_ENV_VAR) {
            Some(raw) => {
                let options = OptionsLayer::from_json(&raw, OPTIONS_ENV_VAR)?;
                layers.push((
                    ConfigSource::Environment(OPTIONS_ENV_VAR.to_string()),
                    SettingsLayer {
                        options,
                        ..SettingsLayer::default()
                    },
                ));
            }
            None => debug!("{} not set, using defaults", OPTIONS_ENV_VAR),
        }

        if let Some(raw) = env(API_ENV_VAR) {
            let api = ApiLayer::from_json(&raw, API_ENV_VAR)?;
            layers.push((
                ConfigSource::Environment(API_ENV_VAR.to_string()),
                SettingsLayer {
                    api,
                    ..SettingsLayer::default()
                },
            ));
        }

        Ok(layers)
    }
}

/// Read and parse a TOML configuration file
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<SettingsLayer> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DepinfoError::io(format!("Failed to read {}", path), e))?;
    SettingsLayer::from_toml(&content, path.as_str())
}
