// FICHIER : provisioner/src/utils/config.rs

use crate::catalog::is_valid_id;
use crate::provision::pacing::PacingPolicy;
use crate::utils::env;
use crate::utils::error::{AppError, Result};
use std::time::Duration;
use url::Url;

// --- Variables d'environnement reconnues ---
pub const ENV_ENDPOINT: &str = "APPWRITE_ENDPOINT";
pub const ENV_PROJECT_ID: &str = "APPWRITE_PROJECT_ID";
pub const ENV_API_KEY: &str = "APPWRITE_API_KEY";
pub const ENV_DATABASE_ID: &str = "APPWRITE_DATABASE_ID";
pub const ENV_ATTRIBUTE_DELAY_MS: &str = "PROVISION_ATTRIBUTE_DELAY_MS";
pub const ENV_COLLECTION_DELAY_MS: &str = "PROVISION_COLLECTION_DELAY_MS";
pub const ENV_TIMEOUT_SECS: &str = "PROVISION_TIMEOUT_SECS";
pub const ENV_LOG_DIR: &str = "PROVISION_LOG_DIR";
pub const ENV_LANG: &str = "PROVISION_LANG";

pub const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Paramètres de connexion et de cadence d'un run.
///
/// Construit une fois au démarrage puis passé explicitement au client et au
/// provisionneur : aucun état global.
#[derive(Clone, PartialEq)]
pub struct ProvisionConfig {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub timeout: Duration,
    pub pacing: PacingPolicy,
}

// La clé API ne doit jamais apparaître dans les logs
impl std::fmt::Debug for ProvisionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvisionConfig")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("api_key", &"***")
            .field("database_id", &self.database_id)
            .field("timeout", &self.timeout)
            .field("pacing", &self.pacing)
            .finish()
    }
}

/// Surcharges optionnelles (typiquement issues des flags du CLI).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub project_id: Option<String>,
    pub api_key: Option<String>,
    pub database_id: Option<String>,
    pub attribute_delay_ms: Option<u64>,
    pub collection_delay_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl ProvisionConfig {
    /// Lit la configuration depuis l'environnement (`.env` déjà chargé par l'appelant).
    pub fn from_env() -> Result<Self> {
        Self::resolve(ConfigOverrides::default())
    }

    /// Environnement + surcharges, surcharges prioritaires. Valide le résultat.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let endpoint = overrides
            .endpoint
            .unwrap_or_else(|| env::get_or(ENV_ENDPOINT, DEFAULT_ENDPOINT));

        let project_id = match overrides.project_id {
            Some(v) => v,
            None => env::get(ENV_PROJECT_ID)?,
        };
        let api_key = match overrides.api_key {
            Some(v) => v,
            None => env::get(ENV_API_KEY)?,
        };
        let database_id = match overrides.database_id {
            Some(v) => v,
            None => env::get(ENV_DATABASE_ID)?,
        };

        let defaults = PacingPolicy::default();
        let attribute_delay = match overrides.attribute_delay_ms {
            Some(ms) => Duration::from_millis(ms),
            None => env::get_parsed_optional::<u64>(ENV_ATTRIBUTE_DELAY_MS)?
                .map(Duration::from_millis)
                .unwrap_or(defaults.attribute_delay),
        };
        let collection_delay = match overrides.collection_delay_ms {
            Some(ms) => Duration::from_millis(ms),
            None => env::get_parsed_optional::<u64>(ENV_COLLECTION_DELAY_MS)?
                .map(Duration::from_millis)
                .unwrap_or(defaults.collection_delay),
        };
        let timeout_secs = match overrides.timeout_secs {
            Some(s) => s,
            None => env::get_parsed_optional::<u64>(ENV_TIMEOUT_SECS)?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let config = Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id,
            api_key,
            database_id,
            timeout: Duration::from_secs(timeout_secs),
            pacing: PacingPolicy::new(attribute_delay, collection_delay),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejette les identifiants vides et les endpoints non http(s).
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            AppError::Config(format!("Endpoint invalide '{}' : {}", self.endpoint, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Endpoint invalide '{}' : schéma http(s) attendu",
                self.endpoint
            )));
        }

        for (name, value) in [
            ("project_id", &self.project_id),
            ("api_key", &self.api_key),
            ("database_id", &self.database_id),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Config(format!("Champ '{}' vide", name)));
            }
        }

        if !is_valid_id(&self.database_id) {
            return Err(AppError::Config(format!(
                "database_id invalide : {:?}",
                self.database_id
            )));
        }

        if self.timeout.is_zero() {
            return Err(AppError::Config("Timeout nul interdit".to_string()));
        }
        Ok(())
    }
}

/// Langue d'affichage (`PROVISION_LANG`, "en" par défaut).
pub fn display_language() -> String {
    env::get_or(ENV_LANG, "en")
}


#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            ENV_ENDPOINT,
            ENV_PROJECT_ID,
            ENV_API_KEY,
            ENV_DATABASE_ID,
            ENV_ATTRIBUTE_DELAY_MS,
            ENV_COLLECTION_DELAY_MS,
            ENV_TIMEOUT_SECS,
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_with_defaults() {
        clear_env();
        std::env::set_var(ENV_PROJECT_ID, "cleanhnote");
        std::env::set_var(ENV_API_KEY, "secret");
        std::env::set_var(ENV_DATABASE_ID, "db-main");

        let cfg = ProvisionConfig::from_env().expect("config valide");
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.pacing, PacingPolicy::default());
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_credentials_is_config_error() {
        clear_env();
        std::env::set_var(ENV_PROJECT_ID, "cleanhnote");
        let err = ProvisionConfig::from_env().unwrap_err();
        match err {
            AppError::Config(msg) => assert!(msg.contains(ENV_API_KEY)),
            other => panic!("Erreur inattendue : {:?}", other),
        }
        clear_env();
    }

    #[test]
    #[serial]
    fn test_overrides_win_over_env() {
        clear_env();
        std::env::set_var(ENV_ENDPOINT, "https://fra.cloud.appwrite.io/v1/");
        std::env::set_var(ENV_ATTRIBUTE_DELAY_MS, "250");

        let cfg = ProvisionConfig::resolve(ConfigOverrides {
            project_id: Some("p".into()),
            api_key: Some("k".into()),
            database_id: Some("d".into()),
            collection_delay_ms: Some(0),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(cfg.endpoint, "https://fra.cloud.appwrite.io/v1");
        assert_eq!(cfg.pacing.attribute_delay, Duration::from_millis(250));
        assert_eq!(cfg.pacing.collection_delay, Duration::ZERO);
        clear_env();
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let mut cfg = test_mocks::mock_config("ftp://example.org");
        assert!(cfg.validate().is_err());
        cfg.endpoint = "pas une url".to_string();
        assert!(cfg.validate().is_err());
        cfg.endpoint = "http://127.0.0.1:8080/v1".to_string();
        assert!(cfg.validate().is_ok());
        cfg.database_id = " ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_database_id_outside_charset() {
        let mut cfg = test_mocks::mock_config("http://localhost/v1");
        cfg.database_id = "main/collections".to_string();
        match cfg.validate() {
            Err(AppError::Config(msg)) => assert!(msg.contains("main/collections")),
            other => panic!("Erreur inattendue : {:?}", other),
        }
        cfg.database_id = "main-db_2".to_string();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let cfg = test_mocks::mock_config("http://localhost/v1");
        let dbg = format!("{:?}", cfg);
        assert!(!dbg.contains("test-key"));
        assert!(dbg.contains("***"));
    }
}
