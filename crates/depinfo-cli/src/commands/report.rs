//! `depinfo report`: fetch tracked dependencies, resolve them, write the report

use depinfo_config::Options;
use depinfo_core::error::DepinfoResult;
use depinfo_inventory::InventoryClient;
use depinfo_registry::{PackageLookup, RegistryClient};
use depinfo_report::write_report;
use depinfo_resolver::{Pipeline, PipelineOptions, PipelineReport};
use tracing::info;

use super::CommandContext;

/// Execute the report command
pub async fn execute(ctx: &CommandContext) -> DepinfoResult<()> {
    let options = &ctx.settings.options;
    let inventory = ctx.inventory_client()?;
    let registry = match &options.registry_url {
        Some(url) => RegistryClient::with_base_url(url.clone())?,
        None => RegistryClient::new()?,
    };

    ctx.output.step("🔍", "Fetching tracked dependencies...");
    let report = run_report(&inventory, registry, options).await?;

    let summary = &report.summary;
    ctx.output.success(&format!(
        "Wrote {} rows to {}",
        report.rows.len(),
        options.output_file
    ));
    ctx.output.summary(summary);
    if summary.dropped > 0 {
        ctx.output.warn(&format!(
            "{} dependencies could not be resolved and are missing from the report",
            summary.dropped
        ));
    }

    Ok(())
}

/// Fetch, resolve, and write; returns what the pipeline produced
pub async fn run_report<L: PackageLookup>(
    inventory: &InventoryClient,
    registry: L,
    options: &Options,
) -> DepinfoResult<PipelineReport> {
    let dependencies = inventory
        .get_all_dependencies(options.limit, options.page_size)
        .await?;
    info!("Resolving {} dependencies", dependencies.len());

    let pipeline = Pipeline::new(
        registry,
        PipelineOptions {
            max_wait: options.max_wait,
            inter_request_delay: options.inter_request_delay(),
        },
    );
    let report = pipeline.run_with_summary(&dependencies).await;

    write_report(&options.output_file, options.output_format, &report.rows)?;
    Ok(report)
}
