//! `depinfo upload`: send manifest files to the inventory service

use camino::Utf8PathBuf;
use depinfo_core::error::{DepinfoError, DepinfoResult};
use depinfo_inventory::find_package_files;

use super::CommandContext;

/// Execute the upload command
pub async fn execute(path: Utf8PathBuf, ctx: &CommandContext) -> DepinfoResult<()> {
    let id = upload_manifests(path, ctx).await?;
    ctx.output.success(&format!("Upload accepted with id {}", id));
    Ok(())
}

/// Find manifests under `path` and upload them, returning the upload id
pub async fn upload_manifests(path: Utf8PathBuf, ctx: &CommandContext) -> DepinfoResult<String> {
    let api = &ctx.settings.api;
    let repo = api
        .repo
        .as_deref()
        .ok_or_else(|| DepinfoError::config_missing("repo"))?;

    let root = if path.is_absolute() { path } else { ctx.cwd.join(path) };
    if !root.is_dir() {
        return Err(DepinfoError::ConfigValidation {
            field: "path".to_string(),
            reason: format!("{} is not a directory", root),
        });
    }

    let files = find_package_files(&root, &ctx.settings.options.package_files)?;
    if files.is_empty() {
        return Err(DepinfoError::ConfigValidation {
            field: "path".to_string(),
            reason: format!(
                "No {} files found under {}",
                ctx.settings.options.package_files.join(" or "),
                root
            ),
        });
    }

    ctx.output.step("📦", &format!("Uploading {} manifest files for {}@{}", files.len(), repo, api.branch));
    let client = ctx.inventory_client()?;
    client.post_dependencies(&files, repo, &api.branch).await
}
