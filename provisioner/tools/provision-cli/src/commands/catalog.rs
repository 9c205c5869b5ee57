use anyhow::Result;
use clap::Args;

use super::CatalogSource;

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub source: CatalogSource,
}

/// Imprime le catalogue (validé) en JSON, réutilisable via `--catalog`.
pub async fn handle(args: CatalogArgs) -> Result<()> {
    let catalog = args.source.load()?;
    println!("{}", catalog.to_json_pretty()?);
    Ok(())
}
