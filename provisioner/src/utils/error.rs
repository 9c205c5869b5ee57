// FICHIER : provisioner/src/utils/error.rs

use serde::Serialize;
use std::io;

/// Code HTTP renvoyé par Appwrite quand la ressource existe déjà.
pub const CONFLICT_STATUS: u16 = 409;

/// Type de résultat standard du provisionneur.
pub type Result<T> = std::result::Result<T, AppError>;

/// Enumération centrale des erreurs.
///
/// Pour le provisionnement, seules deux familles comptent : `AlreadyExists`
/// (attendue, on continue) et tout le reste (on abandonne la collection courante).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    #[error("Erreur Réseau : {0}")]
    Network(#[from] reqwest::Error),

    #[error("Erreur de sérialisation : {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Catalogue invalide : {0}")]
    Catalog(String),

    #[error("Ressource déjà existante : {0}")]
    AlreadyExists(String),

    #[error("Erreur API distante [{status}] {kind} : {message}")]
    Remote {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("Erreur Système : {0}")]
    System(#[from] anyhow::Error),
}

impl AppError {
    /// Vrai si l'erreur correspond à un "409" (ressource déjà présente).
    pub fn is_conflict(&self) -> bool {
        match self {
            AppError::AlreadyExists(_) => true,
            AppError::Remote { status, .. } => *status == CONFLICT_STATUS,
            _ => false,
        }
    }
}

// Sérialisation en simple chaîne (rapport JSON du CLI).
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

// Permet de faire : return Err("Mon erreur".into());
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::System(anyhow::anyhow!(s))
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::System(anyhow::anyhow!(s.to_string()))
    }
}
