use anyhow::Result;
use clap::Args;

use schema_provisioner::provision::{plan, PlannedCall};
use schema_provisioner::utils::i18n::t;
use schema_provisioner::SizePolicy;

use super::CatalogSource;

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: CatalogSource,

    /// Sortie JSON (un objet par appel)
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(args: PlanArgs) -> Result<()> {
    let catalog = args.source.load()?;
    let calls = plan(&catalog, &SizePolicy::default());
    println!("{}", render(&calls, args.json)?);
    Ok(())
}

fn render(calls: &[PlannedCall], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(calls)?);
    }
    let mut out = format!("{} {}", t("PLAN_HEADER"), calls.len());
    for call in calls {
        out.push('\n');
        out.push_str(&call.to_string());
    }
    Ok(out)
}
