// FICHIER : provisioner/src/remote/appwrite.rs

use super::{
    BooleanAttribute, CollectionRequest, DateTimeAttribute, FloatAttribute, IntegerAttribute,
    SchemaApi, StringAttribute,
};
use crate::utils::error::CONFLICT_STATUS;
use crate::utils::{async_trait, prelude::*};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;

// Noms d'en-têtes en minuscules (exigé par `HeaderName::from_static`)
const HEADER_PROJECT: &str = "x-appwrite-project";
const HEADER_KEY: &str = "x-appwrite-key";

/// Corps d'erreur standard d'Appwrite.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(rename = "type", default)]
    kind: String,
}

/// Client REST de l'API Databases d'Appwrite.
///
/// Le `reqwest::Client` est construit une fois et réutilisé pour tout le run
/// (pool de connexions).
#[derive(Debug, Clone)]
pub struct AppwriteClient {
    http: Client,
    endpoint: String,
}

impl AppwriteClient {
    pub fn new(config: &ProvisionConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HEADER_PROJECT, header_value("project_id", &config.project_id)?);

        let mut key = header_value("api_key", &config.api_key)?;
        key.set_sensitive(true);
        headers.insert(HEADER_KEY, key);

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("schema-provisioner/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn collections_url(&self, database_id: &str) -> String {
        format!("{}/databases/{}/collections", self.endpoint, database_id)
    }

    fn attribute_url(&self, database_id: &str, collection_id: &str, kind: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/attributes/{}",
            self.endpoint, database_id, collection_id, kind
        )
    }

    #[instrument(skip(self, body), fields(url = %url))]
    async fn post<T: Serialize + Sync>(&self, url: &str, resource: &str, body: &T) -> Result<()> {
        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();

        if status.is_success() {
            debug!("HTTP {} sur {}", status.as_u16(), url);
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(classify_failure(status.as_u16(), resource, &text))
    }
}

fn header_value(name: &str, raw: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(raw)
        .map_err(|_| AppError::Config(format!("Valeur d'en-tête invalide pour '{}'", name)))
}

/// Traduit une réponse HTTP en échec en erreur classée.
pub fn classify_failure(status: u16, resource: &str, body: &str) -> AppError {
    if status == CONFLICT_STATUS {
        return AppError::AlreadyExists(resource.to_string());
    }

    let (kind, message) = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => (parsed.kind, parsed.message),
        Err(_) => (String::new(), body.trim().to_string()),
    };

    warn!("Erreur HTTP {} ({}) pour {} : {}", status, kind, resource, message);
    AppError::Remote {
        status,
        kind,
        message,
    }
}

#[async_trait]
impl SchemaApi for AppwriteClient {
    async fn create_collection(
        &self,
        database_id: &str,
        request: &CollectionRequest,
    ) -> Result<()> {
        let url = self.collections_url(database_id);
        self.post(&url, &request.collection_id, request).await
    }

    async fn create_string_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        attribute: &StringAttribute,
    ) -> Result<()> {
        let url = self.attribute_url(database_id, collection_id, "string");
        let resource = format!("{}.{}", collection_id, attribute.key);
        self.post(&url, &resource, attribute).await
    }

    async fn create_datetime_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        attribute: &DateTimeAttribute,
    ) -> Result<()> {
        let url = self.attribute_url(database_id, collection_id, "datetime");
        let resource = format!("{}.{}", collection_id, attribute.key);
        self.post(&url, &resource, attribute).await
    }

    async fn create_boolean_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        attribute: &BooleanAttribute,
    ) -> Result<()> {
        let url = self.attribute_url(database_id, collection_id, "boolean");
        let resource = format!("{}.{}", collection_id, attribute.key);
        self.post(&url, &resource, attribute).await
    }

    async fn create_integer_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        attribute: &IntegerAttribute,
    ) -> Result<()> {
        let url = self.attribute_url(database_id, collection_id, "integer");
        let resource = format!("{}.{}", collection_id, attribute.key);
        self.post(&url, &resource, attribute).await
    }

    async fn create_float_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        attribute: &FloatAttribute,
    ) -> Result<()> {
        let url = self.attribute_url(database_id, collection_id, "float");
        let resource = format!("{}.{}", collection_id, attribute.key);
        self.post(&url, &resource, attribute).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::test_mocks::mock_config;

    #[test]
    fn test_urls() {
        let client = AppwriteClient::new(&mock_config("https://fra.cloud.appwrite.io/v1/")).unwrap();
        assert_eq!(client.endpoint(), "https://fra.cloud.appwrite.io/v1");
        assert_eq!(
            client.collections_url("db1"),
            "https://fra.cloud.appwrite.io/v1/databases/db1/collections"
        );
        assert_eq!(
            client.attribute_url("db1", "users", "string"),
            "https://fra.cloud.appwrite.io/v1/databases/db1/collections/users/attributes/string"
        );
    }

    #[test]
    fn test_invalid_header_value_is_config_error() {
        let mut cfg = mock_config("http://localhost/v1");
        cfg.api_key = "clé\nmultiligne".to_string();
        assert!(matches!(
            AppwriteClient::new(&cfg),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_classify_conflict() {
        let body = r#"{"message":"Collection with the requested ID already exists.","code":409,"type":"collection_already_exists","version":"1.5.7"}"#;
        let err = classify_failure(409, "users", body);
        assert!(err.is_conflict());
        assert!(matches!(err, AppError::AlreadyExists(ref r) if r == "users"));
    }

    #[test]
    fn test_classify_other_errors() {
        let body = r#"{"message":"Invalid API key","code":401,"type":"user_unauthorized"}"#;
        match classify_failure(401, "users", body) {
            AppError::Remote {
                status,
                kind,
                message,
            } => {
                assert_eq!(status, 401);
                assert_eq!(kind, "user_unauthorized");
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("Attendu AppError::Remote, obtenu {:?}", other),
        }
    }

    #[test]
    fn test_classify_non_json_body() {
        match classify_failure(502, "tasks.title", "  Bad Gateway  ") {
            AppError::Remote { kind, message, .. } => {
                assert!(kind.is_empty());
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("Attendu AppError::Remote, obtenu {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let client = AppwriteClient::new(&mock_config("http://127.0.0.1:1/v1")).unwrap();
        let req = CollectionRequest {
            collection_id: "users".into(),
            name: "Users".into(),
            permissions: vec![],
            document_security: true,
            enabled: true,
        };
        let res = client.create_collection("db", &req).await;
        assert!(matches!(res, Err(AppError::Network(_))));
    }
}
