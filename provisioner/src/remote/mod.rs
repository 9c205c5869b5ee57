// FICHIER : provisioner/src/remote/mod.rs

//! Contrat avec l'API de gestion de schéma distante.
//!
//! Le provisionneur ne connaît que le trait [`SchemaApi`] : le client HTTP
//! Appwrite en est une implémentation, les tests en fournissent une autre.

pub mod appwrite;

pub use self::appwrite::AppwriteClient;

use crate::utils::{async_trait, prelude::*};

/// Permissions publiques posées sur chaque collection créée.
pub fn public_permissions() -> Vec<String> {
    vec![r#"read("any")"#.to_string(), r#"write("any")"#.to_string()]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRequest {
    pub collection_id: String,
    pub name: String,
    pub permissions: Vec<String>,
    pub document_security: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringAttribute {
    pub key: String,
    pub size: u32,
    pub required: bool,
    pub default: Option<String>,
    pub array: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateTimeAttribute {
    pub key: String,
    pub required: bool,
    pub default: Option<String>,
    pub array: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanAttribute {
    pub key: String,
    pub required: bool,
    pub default: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegerAttribute {
    pub key: String,
    pub required: bool,
    pub min: i64,
    pub max: i64,
    pub default: Option<i64>,
    pub array: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatAttribute {
    pub key: String,
    pub required: bool,
    pub min: f64,
    pub max: f64,
    pub default: Option<f64>,
    pub array: bool,
}

/// Un appel de création d'attribut, paramètres résolus.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AttributeRequest {
    String(StringAttribute),
    #[serde(rename = "datetime")]
    DateTime(DateTimeAttribute),
    Boolean(BooleanAttribute),
    Integer(IntegerAttribute),
    Float(FloatAttribute),
}

impl AttributeRequest {
    pub fn key(&self) -> &str {
        match self {
            AttributeRequest::String(a) => &a.key,
            AttributeRequest::DateTime(a) => &a.key,
            AttributeRequest::Boolean(a) => &a.key,
            AttributeRequest::Integer(a) => &a.key,
            AttributeRequest::Float(a) => &a.key,
        }
    }

    /// Segment d'URL Appwrite (`.../attributes/{segment}`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            AttributeRequest::String(_) => "string",
            AttributeRequest::DateTime(_) => "datetime",
            AttributeRequest::Boolean(_) => "boolean",
            AttributeRequest::Integer(_) => "integer",
            AttributeRequest::Float(_) => "float",
        }
    }
}

/// Opérations consommées sur l'API distante.
///
/// Chaque appel renvoie `Ok(())` ou une erreur classée : `AppError::AlreadyExists`
/// pour un 409, toute autre variante sinon.
#[async_trait]
pub trait SchemaApi: Send + Sync {
    async fn create_collection(&self, database_id: &str, request: &CollectionRequest)
        -> Result<()>;

    async fn create_string_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        attribute: &StringAttribute,
    ) -> Result<()>;

    async fn create_datetime_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        attribute: &DateTimeAttribute,
    ) -> Result<()>;

    async fn create_boolean_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        attribute: &BooleanAttribute,
    ) -> Result<()>;

    async fn create_integer_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        attribute: &IntegerAttribute,
    ) -> Result<()>;

    async fn create_float_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        attribute: &FloatAttribute,
    ) -> Result<()>;

    /// Aiguille vers l'opération propre au type.
    async fn create_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        request: &AttributeRequest,
    ) -> Result<()> {
        match request {
            AttributeRequest::String(a) => {
                self.create_string_attribute(database_id, collection_id, a)
                    .await
            }
            AttributeRequest::DateTime(a) => {
                self.create_datetime_attribute(database_id, collection_id, a)
                    .await
            }
            AttributeRequest::Boolean(a) => {
                self.create_boolean_attribute(database_id, collection_id, a)
                    .await
            }
            AttributeRequest::Integer(a) => {
                self.create_integer_attribute(database_id, collection_id, a)
                    .await
            }
            AttributeRequest::Float(a) => {
                self.create_float_attribute(database_id, collection_id, a)
                    .await
            }
        }
    }
}
