use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use schema_provisioner::provision::plan;
use schema_provisioner::utils::config::{
    ConfigOverrides, ProvisionConfig, ENV_API_KEY, ENV_ATTRIBUTE_DELAY_MS,
    ENV_COLLECTION_DELAY_MS, ENV_DATABASE_ID, ENV_ENDPOINT, ENV_PROJECT_ID, ENV_TIMEOUT_SECS,
};
use schema_provisioner::utils::i18n::t;
use schema_provisioner::{user_info, user_warn};
use schema_provisioner::{AppwriteClient, ProvisionReport, Provisioner, SizePolicy};

use super::CatalogSource;

/// Paramètres de connexion. Chaque flag retombe sur sa variable d'environnement.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// URL de l'API (ex: https://cloud.appwrite.io/v1)
    #[arg(long, env = ENV_ENDPOINT)]
    pub endpoint: Option<String>,

    #[arg(long = "project", env = ENV_PROJECT_ID)]
    pub project_id: Option<String>,

    /// Clé serveur (jamais affichée)
    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long = "database", env = ENV_DATABASE_ID)]
    pub database_id: Option<String>,

    /// Pause après chaque attribut
    #[arg(long, env = ENV_ATTRIBUTE_DELAY_MS)]
    pub attribute_delay_ms: Option<u64>,

    /// Pause après chaque collection menée à terme
    #[arg(long, env = ENV_COLLECTION_DELAY_MS)]
    pub collection_delay_ms: Option<u64>,

    #[arg(long, env = ENV_TIMEOUT_SECS)]
    pub timeout_secs: Option<u64>,
}

impl From<ConnectionArgs> for ConfigOverrides {
    fn from(args: ConnectionArgs) -> Self {
        ConfigOverrides {
            endpoint: args.endpoint,
            project_id: args.project_id,
            api_key: args.api_key,
            database_id: args.database_id,
            attribute_delay_ms: args.attribute_delay_ms,
            collection_delay_ms: args.collection_delay_ms,
            timeout_secs: args.timeout_secs,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub source: CatalogSource,

    /// Code de sortie 1 si une collection a échoué
    #[arg(long)]
    pub strict: bool,

    /// Écrit le rapport JSON du run dans ce fichier
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Valide la configuration et affiche le plan sans rien envoyer
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn handle(args: ApplyArgs) -> Result<()> {
    let catalog = args.source.load()?;
    let config = ProvisionConfig::resolve(args.connection.into())
        .with_context(|| t("CONFIG_INVALID"))?;
    tracing::debug!(?config, "Configuration résolue");

    if args.dry_run {
        user_info!("DRY_RUN", "{}", config.endpoint);
        for call in plan(&catalog, &SizePolicy::default()) {
            println!("{}", call);
        }
        return Ok(());
    }

    let client = AppwriteClient::new(&config)?;
    let report = Provisioner::new(&client, &config.database_id)
        .with_pacing(config.pacing)
        .run(&catalog)
        .await;

    print_summary(&report);

    if let Some(path) = &args.report {
        write_report(&report, path)?;
    }

    if args.strict && !report.is_clean() {
        bail!("{} {}", t("STRICT_FAILED"), report.failed_collections().join(", "));
    }
    Ok(())
}

fn print_summary(report: &ProvisionReport) {
    let line = format!(
        "created={} existing={} unsupported={} failed={}",
        report.created_count(),
        report.existing_count(),
        report.unsupported_count(),
        report.failed_collections().len()
    );
    if report.is_clean() {
        user_info!("REPORT_SUMMARY", "{}", line);
    } else {
        user_warn!("REPORT_SUMMARY", "{}", line);
    }
}

fn write_report(report: &ProvisionReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Écriture du rapport impossible : {}", path.display()))?;
    tracing::info!(path = %path.display(), "Rapport écrit");
    Ok(())
}
