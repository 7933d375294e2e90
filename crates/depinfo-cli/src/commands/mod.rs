//! Command implementations and dispatch logic.
//!
//! Each command is implemented as an async function that takes a CommandContext.

use camino::Utf8PathBuf;
use depinfo_config::{ConfigLoader, ConfigOverrides, Settings};
use depinfo_core::error::{DepinfoError, DepinfoResult};
use depinfo_inventory::InventoryClient;
use tracing::{debug, info};

pub mod orgs;
pub mod report;
pub mod upload;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub settings: Settings,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Load settings for the current directory and build the context
    pub async fn load(config_path: Option<Utf8PathBuf>, overrides: ConfigOverrides) -> DepinfoResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| DepinfoError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| DepinfoError::ConfigValidation {
            field: "cwd".to_string(),
            reason: format!("Current directory is not valid UTF-8: {}", e),
        })?;

        let (settings, sources) = ConfigLoader::new(cwd.clone())
            .with_config_path(config_path)
            .load(overrides)
            .await?;
        for source in &sources {
            debug!("Configuration layer: {}", source);
        }

        Ok(Self {
            cwd,
            settings,
            output: OutputHandler::new(),
        })
    }

    /// Inventory client for the configured key and URL
    pub fn inventory_client(&self) -> DepinfoResult<InventoryClient> {
        let api = &self.settings.api;
        match &api.url {
            Some(url) => InventoryClient::with_base_url(&api.key, url.clone()),
            None => InventoryClient::new(&api.key),
        }
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> DepinfoResult<()> {
    match command {
        Commands::Report(_) => {
            info!("Generating dependency report");
            report::execute(ctx).await
        }
        Commands::Upload(args) => {
            info!("Uploading manifests from {}", args.path);
            upload::execute(args.path, ctx).await
        }
        Commands::Orgs { name, json } => {
            info!("Listing organizations");
            orgs::execute(name, json, ctx).await
        }
    }
}
