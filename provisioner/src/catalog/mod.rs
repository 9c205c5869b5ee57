// FICHIER : provisioner/src/catalog/mod.rs

//! Catalogue déclaratif des collections à provisionner.
//!
//! Le catalogue est une simple donnée ordonnée : l'ordre d'insertion est
//! l'ordre de création côté Appwrite, identique d'un run à l'autre.

pub mod builtin;
pub mod size_policy;

pub use self::builtin::builtin_catalog;
pub use self::size_policy::SizePolicy;

use crate::utils::prelude::*;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Longueur maximale d'un identifiant Appwrite.
pub const MAX_ID_LEN: usize = 36;

/// Identifiant utilisable tel quel dans un chemin d'URL Appwrite :
/// `a-z A-Z 0-9 . - _`, 36 caractères au plus, premier caractère alphanumérique.
pub fn is_valid_id(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    id.len() <= MAX_ID_LEN
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

/// Type d'un attribut. `Unsupported` conserve le nom brut d'un type inconnu
/// (catalogue JSON) pour que le provisionneur puisse l'ignorer avec un avertissement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttributeKind {
    String,
    DateTime,
    Boolean,
    Integer,
    Float,
    Unsupported(String),
}

impl AttributeKind {
    pub fn as_str(&self) -> &str {
        match self {
            AttributeKind::String => "string",
            AttributeKind::DateTime => "datetime",
            AttributeKind::Boolean => "boolean",
            AttributeKind::Integer => "integer",
            AttributeKind::Float => "double",
            AttributeKind::Unsupported(raw) => raw,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, AttributeKind::Unsupported(_))
    }
}

impl From<String> for AttributeKind {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "string" => AttributeKind::String,
            "datetime" => AttributeKind::DateTime,
            "boolean" | "bool" => AttributeKind::Boolean,
            "integer" | "int" => AttributeKind::Integer,
            "double" | "float" => AttributeKind::Float,
            _ => AttributeKind::Unsupported(raw),
        }
    }
}

impl From<AttributeKind> for String {
    fn from(kind: AttributeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Définition d'un champ d'une collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    #[serde(default)]
    pub required: bool,
}

impl AttributeSpec {
    pub fn new(key: &str, kind: AttributeKind, required: bool) -> Self {
        Self {
            key: key.to_string(),
            kind,
            required,
        }
    }

    pub fn string(key: &str, required: bool) -> Self {
        Self::new(key, AttributeKind::String, required)
    }

    pub fn datetime(key: &str, required: bool) -> Self {
        Self::new(key, AttributeKind::DateTime, required)
    }

    pub fn boolean(key: &str, required: bool) -> Self {
        Self::new(key, AttributeKind::Boolean, required)
    }

    pub fn integer(key: &str, required: bool) -> Self {
        Self::new(key, AttributeKind::Integer, required)
    }

    pub fn float(key: &str, required: bool) -> Self {
        Self::new(key, AttributeKind::Float, required)
    }
}

/// Une collection et ses attributs, dans l'ordre de création.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeSpec>,
}

impl CollectionSpec {
    pub fn new(id: &str, name: &str, attributes: Vec<AttributeSpec>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            attributes,
        }
    }
}

/// Liste ordonnée de collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    collections: Vec<CollectionSpec>,
}

impl Catalog {
    pub fn new(collections: Vec<CollectionSpec>) -> Self {
        Self { collections }
    }

    pub fn collections(&self) -> &[CollectionSpec] {
        &self.collections
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CollectionSpec> {
        self.collections.iter()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CollectionSpec> {
        self.collections.iter().find(|c| c.id == id)
    }

    pub fn attribute_count(&self) -> usize {
        self.collections.iter().map(|c| c.attributes.len()).sum()
    }

    /// Vérifie l'unicité des ids de collection et des clés d'attribut.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for collection in &self.collections {
            if collection.id.trim().is_empty() {
                return Err(AppError::Catalog(format!(
                    "collection sans id (nom '{}')",
                    collection.name
                )));
            }
            if !is_valid_id(&collection.id) {
                return Err(AppError::Catalog(format!(
                    "id de collection invalide : {:?}",
                    collection.id
                )));
            }
            if !ids.insert(collection.id.as_str()) {
                return Err(AppError::Catalog(format!(
                    "id de collection dupliqué : {}",
                    collection.id
                )));
            }

            let mut keys = HashSet::new();
            for attr in &collection.attributes {
                if attr.key.trim().is_empty() {
                    return Err(AppError::Catalog(format!(
                        "attribut sans clé dans {}",
                        collection.id
                    )));
                }
                if !keys.insert(attr.key.as_str()) {
                    return Err(AppError::Catalog(format!(
                        "clé d'attribut dupliquée : {}.{}",
                        collection.id, attr.key
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parse un catalogue JSON (tableau de collections) et le valide.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&raw)?;
        debug!(
            "📂 Catalogue chargé depuis {:?} ({} collections)",
            path,
            catalog.len()
        );
        Ok(catalog)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CollectionSpec;
    type IntoIter = std::slice::Iter<'a, CollectionSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.collections.iter()
    }
}

impl FromIterator<CollectionSpec> for Catalog {
    fn from_iter<I: IntoIterator<Item = CollectionSpec>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
