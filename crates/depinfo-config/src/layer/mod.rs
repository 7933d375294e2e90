//! Partial settings read from one configuration source
//!
//! Every field is optional; a layer only replaces what it sets.

use camino::Utf8PathBuf;
use serde::Deserialize;

use depinfo_core::error::DepinfoError;
use depinfo_core::OutputFormat;
use crate::settings::{ConfigOverrides, Settings};
use crate::ConfigResult;

/// One layer of configuration, as found in `depinfo.toml`
///
/// ```toml
/// [api]
/// repo = "web"
///
/// [options]
/// limit = 500
/// wait_time = 1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsLayer {
    #[serde(default)]
    pub api: ApiLayer,
    #[serde(default)]
    pub options: OptionsLayer,
}

/// Inventory credentials, the shape of `SOCKET_API`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiLayer {
    pub key: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub url: Option<String>,
}

/// Pipeline options, the shape of `SOCKET_CONFIG`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OptionsLayer {
    pub output_file: Option<Utf8PathBuf>,
    pub output_format: Option<OutputFormat>,
    pub package_files: Option<Vec<String>>,
    pub wait_time: Option<u64>,
    pub max_wait: Option<u32>,
    pub limit: Option<usize>,
    pub page_size: Option<usize>,
    pub registry_url: Option<String>,
}

impl SettingsLayer {
    /// Parse a TOML configuration file
    pub fn from_toml(content: &str, source_name: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| DepinfoError::ConfigParse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
    }

    /// Replace every field of `settings` this layer sets
    pub fn apply_to(self, settings: &mut Settings) {
        let api = &mut settings.api;
        if let Some(key) = self.api.key {
            api.key = key;
        }
        if let Some(repo) = self.api.repo {
            api.repo = Some(repo);
        }
        if let Some(branch) = self.api.branch {
            api.branch = branch;
        }
        if let Some(url) = self.api.url {
            api.url = Some(url);
        }

        let options = &mut settings.options;
        let layer = self.options;
        if let Some(output_file) = layer.output_file {
            options.output_file = output_file;
        }
        if let Some(output_format) = layer.output_format {
            options.output_format = output_format;
        }
        if let Some(package_files) = layer.package_files {
            options.package_files = package_files;
        }
        if let Some(wait_time) = layer.wait_time {
            options.wait_time = wait_time;
        }
        if let Some(max_wait) = layer.max_wait {
            options.max_wait = max_wait;
        }
        if let Some(limit) = layer.limit {
            options.limit = limit;
        }
        if let Some(page_size) = layer.page_size {
            options.page_size = Some(page_size);
        }
        if let Some(registry_url) = layer.registry_url {
            options.registry_url = Some(registry_url);
        }
    }
}

impl ApiLayer {
    /// Parse the JSON object held by an environment variable
    pub fn from_json(content: &str, source_name: &str) -> ConfigResult<Self> {
        parse_json_object(content, source_name)
    }
}

impl OptionsLayer {
    /// Parse the JSON object held by an environment variable
    ///
    /// Unknown keys are ignored so older option sets keep working.
    pub fn from_json(content: &str, source_name: &str) -> ConfigResult<Self> {
        parse_json_object(content, source_name)
    }
}

impl From<ConfigOverrides> for SettingsLayer {
    fn from(overrides: ConfigOverrides) -> Self {
        Self {
            api: ApiLayer {
                key: overrides.api_key,
                repo: overrides.repo,
                branch: overrides.branch,
                url: None,
            },
            options: OptionsLayer {
                output_file: overrides.output_file,
                output_format: overrides.output_format,
                package_files: None,
                wait_time: overrides.wait_time,
                max_wait: overrides.max_wait,
                limit: overrides.limit,
                page_size: overrides.page_size,
                registry_url: overrides.registry_url,
            },
        }
    }
}

fn parse_json_object<T: serde::de::DeserializeOwned>(content: &str, source_name: &str) -> ConfigResult<T> {
    serde_json::from_str(content).map_err(|e| DepinfoError::ConfigParse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ApiSettings, Options};

    #[test]
    fn test_parse_toml() {
        let layer = SettingsLayer::from_toml(
            r#"
[api]
repo = "web"

[options]
limit = 500
output_format = "json"
package_files = ["package.json"]
"#,
            "depinfo.toml",
        )
        .unwrap();

        assert_eq!(layer.api.repo.as_deref(), Some("web"));
        assert_eq!(layer.api.key, None);
        assert_eq!(layer.options.limit, Some(500));
        assert_eq!(layer.options.output_format, Some(OutputFormat::Json));
        assert_eq!(layer.options.package_files, Some(vec!["package.json".to_string()]));
    }

    #[test]
    fn test_toml_errors_name_the_source() {
        let error = SettingsLayer::from_toml("[options\nlimit = 1", "depinfo.toml").unwrap_err();
        match error {
            DepinfoError::ConfigParse { source_name, .. } => assert_eq!(source_name, "depinfo.toml"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_options_json_ignores_unknown_keys() {
        let layer = OptionsLayer::from_json(
            r#"{"output_file": "out.csv", "max_wait": 3, "verbose": true}"#,
            "SOCKET_CONFIG",
        )
        .unwrap();

        assert_eq!(layer.output_file.as_deref(), Some(camino::Utf8Path::new("out.csv")));
        assert_eq!(layer.max_wait, Some(3));
    }

    #[test]
    fn test_api_json_must_be_json() {
        let result = ApiLayer::from_json("key=abc", "SOCKET_API");
        assert!(matches!(result, Err(DepinfoError::ConfigParse { .. })));
    }

    #[test]
    fn test_apply_only_replaces_set_fields() {
        let mut settings = Settings {
            api: ApiSettings::default(),
            options: Options::default(),
        };
        let layer = SettingsLayer {
            api: ApiLayer {
                key: Some("abc".to_string()),
                ..ApiLayer::default()
            },
            options: OptionsLayer {
                wait_time: Some(2),
                ..OptionsLayer::default()
            },
        };

        layer.apply_to(&mut settings);

        assert_eq!(settings.api.key, "abc");
        assert_eq!(settings.api.branch, "dependencies");
        assert_eq!(settings.options.wait_time, 2);
        assert_eq!(settings.options.max_wait, 20);
    }

    #[test]
    fn test_overrides_become_a_layer() {
        let layer = SettingsLayer::from(ConfigOverrides {
            limit: Some(5),
            branch: Some("main".to_string()),
            ..ConfigOverrides::default()
        });

        assert_eq!(layer.options.limit, Some(5));
        assert_eq!(layer.api.branch.as_deref(), Some("main"));
        assert_eq!(layer.options.wait_time, None);
    }
}
