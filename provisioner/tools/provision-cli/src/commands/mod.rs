// Déclaration des commandes du CLI
// Chaque module ici correspond à une sous-commande

pub mod apply;
pub mod catalog;
pub mod plan;

use anyhow::{Context, Result};
use clap::Args;
use schema_provisioner::{builtin_catalog, Catalog};
use std::path::PathBuf;

/// Origine du catalogue : fichier JSON ou catalogue embarqué.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogSource {
    /// Catalogue JSON à utiliser à la place du catalogue embarqué
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

impl CatalogSource {
    pub fn load(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::load(path).with_context(|| {
                format!(
                    "{} {}",
                    schema_provisioner::utils::i18n::t("CATALOG_INVALID"),
                    path.display()
                )
            }),
            None => Ok(builtin_catalog()),
        }
    }
}

pub fn print_examples() {
    println!("--------------------------------------------------");
    println!("📘 provision-cli : exemples");
    println!("--------------------------------------------------");
    println!("# Variables attendues (ou fichier .env) :");
    println!("  APPWRITE_ENDPOINT=https://fra.cloud.appwrite.io/v1");
    println!("  APPWRITE_PROJECT_ID=<projet>");
    println!("  APPWRITE_API_KEY=<clé serveur>");
    println!("  APPWRITE_DATABASE_ID=<base>");
    println!();
    println!("# Voir ce qui sera créé, sans réseau :");
    println!("  provision-cli plan");
    println!();
    println!("# Appliquer le catalogue embarqué :");
    println!("  provision-cli apply");
    println!();
    println!("# Exporter, modifier puis appliquer un catalogue :");
    println!("  provision-cli catalog > schema.json");
    println!("  provision-cli apply --catalog schema.json --strict --report bilan.json");
    println!();
    println!("# Sans pause entre les appels (émulateur local) :");
    println!("  provision-cli apply --attribute-delay-ms 0 --collection-delay-ms 0");
}
