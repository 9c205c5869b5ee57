use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;

mod commands;

use schema_provisioner::user_error;
use schema_provisioner::utils::config::ENV_LOG_DIR;
use schema_provisioner::utils::context::{self, LogOptions};

#[derive(Parser)]
#[command(name = "provision-cli")]
#[command(about = "Création idempotente des collections Appwrite", long_about = None)]
#[command(version)]
struct Cli {
    /// Dossier du journal JSON quotidien
    #[arg(long, global = true, env = ENV_LOG_DIR, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Logs détaillés (debug) en console
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Crée les collections et attributs manquants sur la base distante
    Apply(commands::apply::ApplyArgs),

    /// Affiche les appels distants qu'un `apply` émettrait (sans réseau)
    Plan(commands::plan::PlanArgs),

    /// Exporte le catalogue en JSON
    Catalog(commands::catalog::CatalogArgs),

    /// Affiche des exemples d'utilisation
    Usage,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. .env avant le parsing (les flags lisent l'environnement)
    dotenv().ok();
    let cli = Cli::parse();

    // 2. Langue + Logger
    context::init_i18n(&context::display_language());
    context::init_logging(&LogOptions {
        log_dir: cli.log_dir.clone(),
        default_filter: Some(if cli.verbose { "debug" } else { "warn" }.to_string()),
    });
    tracing::debug!("provision-cli v{}", env!("CARGO_PKG_VERSION"));

    // 3. Dispatch
    if let Err(e) = execute_command(cli.command).await {
        user_error!("CMD_FAIL", "{:#}", e);
        std::process::exit(1);
    }

    tracing::debug!("Fin de l'exécution du CLI");
    Ok(())
}

async fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Apply(args) => commands::apply::handle(args).await,
        Commands::Plan(args) => commands::plan::handle(args).await,
        Commands::Catalog(args) => commands::catalog::handle(args).await,
        Commands::Usage => {
            commands::print_examples();
            Ok(())
        }
    }
}
