// FICHIER : provisioner/src/catalog/size_policy.rs

use std::collections::HashMap;

/// Taille par défaut d'un attribut string absent de la table.
pub const DEFAULT_STRING_SIZE: u32 = 50;

/// Table clé d'attribut -> taille maximale de la chaîne.
///
/// Les tailles restent volontairement petites : Appwrite refuse une collection
/// dont la somme des tailles dépasse sa limite (`attribute_limit_exceeded`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizePolicy {
    sizes: HashMap<String, u32>,
    default_size: u32,
}

impl Default for SizePolicy {
    fn default() -> Self {
        let table: [(&str, u32); 15] = [
            ("email", 100),
            ("name", 50),
            ("team_name", 50),
            ("description", 1000),
            ("comment", 500),
            ("message", 200),
            ("photo_url", 500),
            ("location_data", 200),
            ("title", 100),
            ("status", 20),
            ("plan_type", 20),
            ("plan_duration", 20),
            ("payment_method", 20),
            ("payment_status", 20),
            ("photo_type", 20),
        ];
        Self {
            sizes: table.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            default_size: DEFAULT_STRING_SIZE,
        }
    }
}

impl SizePolicy {
    pub fn size_for(&self, key: &str) -> u32 {
        self.sizes.get(key).copied().unwrap_or(self.default_size)
    }
}
