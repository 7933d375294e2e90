//! `depinfo orgs`: list organizations visible to the API key

use depinfo_core::error::{DepinfoError, DepinfoResult};

use super::CommandContext;

/// Execute the orgs command
pub async fn execute(name: Option<String>, json: bool, ctx: &CommandContext) -> DepinfoResult<()> {
    let client = ctx.inventory_client()?;
    let organizations = client.find_organizations(name.as_deref()).await?;

    if json {
        let rendered = serde_json::to_string_pretty(&organizations).map_err(|e| DepinfoError::JsonParse {
            message: e.to_string(),
        })?;
        println!("{}", rendered);
        return Ok(());
    }

    if organizations.is_empty() {
        ctx.output.warn("No organizations found");
        return Ok(());
    }

    for org in &organizations {
        let plan = org.plan.as_deref().unwrap_or("-");
        println!("{}\t{}\t{}", org.id, org.name, plan);
    }
    ctx.output.info(&format!("{} organizations", organizations.len()));
    Ok(())
}
