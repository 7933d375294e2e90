//! # depinfo
//!
//! Reports the license and source repository of every dependency tracked by
//! the inventory service.
//!
//! This is the main entry point for the depinfo CLI. It handles command parsing,
//! sets up logging and error handling, and dispatches to the appropriate command handlers.

use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use depinfo_config::ConfigOverrides;
use depinfo_core::error::{DepinfoError, DepinfoResult};
use depinfo_core::OutputFormat;
use tracing::{error, info};

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Report license and source repository for every tracked dependency
#[derive(Parser)]
#[command(name = "depinfo", version, about = "Dependency license and repository report")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project configuration file (default: nearest depinfo.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Inventory API key, overriding SOCKET_API
    #[arg(long, global = true, env = "DEPINFO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every tracked dependency and write the report
    Report(ReportArgs),
    /// Upload manifest files found under a directory
    Upload(UploadArgs),
    /// List organizations visible to the API key
    Orgs {
        /// Only show organizations with this name
        #[arg(long)]
        name: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Report file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,
    /// Report format
    #[arg(long)]
    pub format: Option<OutputFormat>,
    /// Maximum number of dependencies to fetch
    #[arg(long)]
    pub limit: Option<usize>,
    /// Inventory page size
    #[arg(long)]
    pub page_size: Option<usize>,
    /// Retry budget per dependency
    #[arg(long)]
    pub max_wait: Option<u32>,
    /// Seconds to pause after each dependency
    #[arg(long)]
    pub wait_time: Option<u64>,
    /// Registry root URL
    #[arg(long, value_name = "URL")]
    pub registry_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Directory searched for manifest files
    #[arg(long, value_name = "DIR")]
    pub path: Utf8PathBuf,
    /// Repository name the upload is filed under
    #[arg(long)]
    pub repo: Option<String>,
    /// Branch name the upload is filed under
    #[arg(long)]
    pub branch: Option<String>,
}

impl Cli {
    /// Flags that override loaded configuration
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            api_key: self.api_key.clone(),
            ..ConfigOverrides::default()
        };

        match &self.command {
            Commands::Report(args) => {
                overrides.output_file = args.output.clone();
                overrides.output_format = args.format;
                overrides.limit = args.limit;
                overrides.page_size = args.page_size;
                overrides.max_wait = args.max_wait;
                overrides.wait_time = args.wait_time;
                overrides.registry_url = args.registry_url.clone();
            }
            Commands::Upload(args) => {
                overrides.repo = args.repo.clone();
                overrides.branch = args.branch.clone();
            }
            Commands::Orgs { .. } => {}
        }

        overrides
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting depinfo v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> DepinfoResult<()> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| DepinfoError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let overrides = cli.overrides();
        let ctx = CommandContext::load(cli.config.clone(), overrides).await?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "depinfo={level},depinfo_core={level},depinfo_config={level},depinfo_registry={level},\
             depinfo_resolver={level},depinfo_inventory={level},depinfo_report={level}"
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("depinfo encountered an unexpected error: {}", panic_info);
        eprintln!("depinfo crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/depinfo/depinfo/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
