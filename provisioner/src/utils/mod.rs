// FICHIER : provisioner/src/utils/mod.rs

// =========================================================================
//  UTILS - Couche socle (config, erreurs, logs, i18n)
// =========================================================================

pub mod config;
pub mod env;
pub mod error;
pub mod i18n;
pub mod logger;
pub mod macros;

/// **Application Context** : Config/Log/Env.
pub mod context {
    pub use super::config::{display_language, ConfigOverrides, ProvisionConfig};
    pub use super::env::{get, get_or};
    pub use super::i18n::{init_i18n, t};
    pub use super::logger::{init_logging, LogOptions};
}

/// **Le Prélude** : À utiliser via `use crate::utils::prelude::*;`
pub mod prelude {
    pub use super::context::ProvisionConfig;
    pub use super::error::{AppError, Result};
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{json, Value};
    pub use tracing::{debug, error, info, instrument, warn};
}

pub use error::{AppError, Result};

// --> Async Runtime
pub use async_trait::async_trait;
pub use std::time::Duration;
pub use tokio::time::sleep;
