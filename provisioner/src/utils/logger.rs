// FICHIER : provisioner/src/utils/logger.rs

use std::path::PathBuf;
use std::sync::Once;
use tracing_appender::rolling;
use tracing_subscriber::{
    filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

// Sécurité pour éviter la double initialisation (crash fréquent en tests)
static INIT: Once = Once::new();

pub const LOG_FILE_PREFIX: &str = "provisioner.log";

/// Options du logger, issues de la configuration.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Dossier du journal JSON quotidien. `None` => console uniquement.
    pub log_dir: Option<PathBuf>,
    /// Filtre par défaut si `RUST_LOG` est absent.
    pub default_filter: Option<String>,
}

pub fn init_logging(options: &LogOptions) {
    INIT.call_once(|| {
        // =========================================================================
        // LAYER 1 : CONSOLE (Pour l'Humain)
        // =========================================================================
        let default_filter = options.default_filter.as_deref().unwrap_or("info");
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        // Les macros user_* affichent déjà le message : pas de doublon en console
        let anti_double_filter =
            filter_fn(|metadata| !metadata.fields().iter().any(|f| f.name() == "event"));

        let console_layer = fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .with_filter(anti_double_filter);

        // =========================================================================
        // LAYER 2 : FICHIER JSON (optionnel)
        // =========================================================================
        let file_layer = options.log_dir.as_ref().and_then(|dir| {
            if let Err(e) = std::fs::create_dir_all(dir) {
                eprintln!("⚠️ [Logger] Dossier de logs inaccessible {:?} : {}", dir, e);
                return None;
            }
            let file_appender = rolling::daily(dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file_appender)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
        });

        let registry = tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer);

        if registry.try_init().is_err() {
            tracing::warn!("⚠️ [Logger] Tentative de ré-initialisation ignorée (Global subscriber déjà actif).");
            return;
        }

        match &options.log_dir {
            Some(dir) => tracing::debug!("🚀 Logger initialisé. Logs disponibles dans : {:?}", dir),
            None => tracing::debug!("🚀 Logger initialisé (console uniquement)."),
        }
    });
}
