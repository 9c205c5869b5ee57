// FICHIER : provisioner/tests/common/mod.rs
#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use schema_provisioner::remote::{
    AttributeRequest, BooleanAttribute, CollectionRequest, DateTimeAttribute, FloatAttribute,
    IntegerAttribute, SchemaApi, StringAttribute,
};
use schema_provisioner::utils::config::ProvisionConfig;
use schema_provisioner::utils::{async_trait, AppError, Duration, Result};
use schema_provisioner::PacingPolicy;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

pub const TEST_PROJECT: &str = "test-project";
pub const TEST_KEY: &str = "test-key";
pub const TEST_DB: &str = "test-db";

pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

// =========================================================================
// FAUX CLIENT EN MÉMOIRE
// =========================================================================

/// Appel reçu par le faux client, dans l'ordre d'arrivée.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Collection(String),
    Attribute {
        collection: String,
        request: AttributeRequest,
    },
}

#[derive(Default)]
struct FakeState {
    collections: HashSet<String>,
    attributes: HashSet<(String, String)>,
    calls: Vec<Call>,
    collection_failures: HashMap<String, u16>,
    attribute_failures: HashMap<(String, String), u16>,
}

/// Implémentation en mémoire de `SchemaApi` : 409 sur doublon, 404 si la
/// collection parente manque, échecs injectables.
#[derive(Default)]
pub struct FakeSchemaApi {
    state: Mutex<FakeState>,
}

impl FakeSchemaApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_collection(&self, collection: &str, status: u16) {
        let mut state = self.state.lock().unwrap();
        state
            .collection_failures
            .insert(collection.to_string(), status);
    }

    pub fn fail_attribute(&self, collection: &str, key: &str, status: u16) {
        let mut state = self.state.lock().unwrap();
        state
            .attribute_failures
            .insert((collection.to_string(), key.to_string()), status);
    }

    pub fn clear_failures(&self) {
        let mut state = self.state.lock().unwrap();
        state.collection_failures.clear();
        state.attribute_failures.clear();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn reset_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn has_collection(&self, id: &str) -> bool {
        self.state.lock().unwrap().collections.contains(id)
    }

    pub fn has_attribute(&self, collection: &str, key: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .attributes
            .contains(&(collection.to_string(), key.to_string()))
    }

    pub fn snapshot(&self) -> (Vec<String>, Vec<(String, String)>) {
        let state = self.state.lock().unwrap();
        let mut cols: Vec<String> = state.collections.iter().cloned().collect();
        let mut attrs: Vec<(String, String)> = state.attributes.iter().cloned().collect();
        cols.sort();
        attrs.sort();
        (cols, attrs)
    }

    fn record_attribute(&self, collection_id: &str, request: AttributeRequest) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let key = request.key().to_string();
        state.calls.push(Call::Attribute {
            collection: collection_id.to_string(),
            request,
        });

        let id = (collection_id.to_string(), key);
        if let Some(status) = state.attribute_failures.get(&id) {
            return Err(remote_error(*status, "injected_failure"));
        }
        if !state.collections.contains(collection_id) {
            return Err(remote_error(404, "collection_not_found"));
        }
        if !state.attributes.insert(id.clone()) {
            return Err(AppError::AlreadyExists(format!("{}.{}", id.0, id.1)));
        }
        Ok(())
    }
}

fn remote_error(status: u16, kind: &str) -> AppError {
    AppError::Remote {
        status,
        kind: kind.to_string(),
        message: format!("simulated {}", status),
    }
}

#[async_trait]
impl SchemaApi for FakeSchemaApi {
    async fn create_collection(&self, _database_id: &str, request: &CollectionRequest) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(Call::Collection(request.collection_id.clone()));

        if let Some(status) = state.collection_failures.get(&request.collection_id) {
            return Err(remote_error(*status, "injected_failure"));
        }
        if !state.collections.insert(request.collection_id.clone()) {
            return Err(AppError::AlreadyExists(request.collection_id.clone()));
        }
        Ok(())
    }

    async fn create_string_attribute(
        &self,
        _database_id: &str,
        collection_id: &str,
        attribute: &StringAttribute,
    ) -> Result<()> {
        self.record_attribute(collection_id, AttributeRequest::String(attribute.clone()))
    }

    async fn create_datetime_attribute(
        &self,
        _database_id: &str,
        collection_id: &str,
        attribute: &DateTimeAttribute,
    ) -> Result<()> {
        self.record_attribute(collection_id, AttributeRequest::DateTime(attribute.clone()))
    }

    async fn create_boolean_attribute(
        &self,
        _database_id: &str,
        collection_id: &str,
        attribute: &BooleanAttribute,
    ) -> Result<()> {
        self.record_attribute(collection_id, AttributeRequest::Boolean(attribute.clone()))
    }

    async fn create_integer_attribute(
        &self,
        _database_id: &str,
        collection_id: &str,
        attribute: &IntegerAttribute,
    ) -> Result<()> {
        self.record_attribute(collection_id, AttributeRequest::Integer(attribute.clone()))
    }

    async fn create_float_attribute(
        &self,
        _database_id: &str,
        collection_id: &str,
        attribute: &FloatAttribute,
    ) -> Result<()> {
        self.record_attribute(collection_id, AttributeRequest::Float(attribute.clone()))
    }
}

// =========================================================================
// ÉMULATEUR APPWRITE (HTTP local)
// =========================================================================

/// Requête reçue par l'émulateur : (chemin relatif, corps JSON).
pub type Received = (String, Value);

#[derive(Default)]
pub struct Emulator {
    collections: Mutex<HashSet<String>>,
    attributes: Mutex<HashSet<(String, String)>>,
    received: Mutex<Vec<Received>>,
}

impl Emulator {
    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    pub fn collection_count(&self) -> usize {
        self.collections.lock().unwrap().len()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.lock().unwrap().len()
    }
}

type Reply = (StatusCode, Json<Value>);

fn error_reply(status: StatusCode, kind: &str, message: &str) -> Reply {
    (
        status,
        Json(json!({
            "message": message,
            "code": status.as_u16(),
            "type": kind,
            "version": "1.5.7"
        })),
    )
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("x-appwrite-project").and_then(|v| v.to_str().ok()) == Some(TEST_PROJECT)
        && headers.get("x-appwrite-key").and_then(|v| v.to_str().ok()) == Some(TEST_KEY)
}

async fn create_collection(
    State(emu): State<Arc<Emulator>>,
    Path(db): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    emu.received
        .lock()
        .unwrap()
        .push((format!("/databases/{}/collections", db), body.clone()));

    if !authorized(&headers) {
        return error_reply(StatusCode::UNAUTHORIZED, "user_unauthorized", "Invalid API key");
    }
    let id = body["collectionId"].as_str().unwrap_or_default().to_string();
    if !emu.collections.lock().unwrap().insert(id.clone()) {
        return error_reply(
            StatusCode::CONFLICT,
            "collection_already_exists",
            "A collection with the requested ID already exists.",
        );
    }
    (StatusCode::CREATED, Json(json!({ "$id": id })))
}

async fn create_attribute(
    State(emu): State<Arc<Emulator>>,
    Path((db, collection, kind)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    emu.received.lock().unwrap().push((
        format!("/databases/{}/collections/{}/attributes/{}", db, collection, kind),
        body.clone(),
    ));

    if !authorized(&headers) {
        return error_reply(StatusCode::UNAUTHORIZED, "user_unauthorized", "Invalid API key");
    }
    if !emu.collections.lock().unwrap().contains(&collection) {
        return error_reply(
            StatusCode::NOT_FOUND,
            "collection_not_found",
            "Collection with the requested ID could not be found.",
        );
    }
    let key = body["key"].as_str().unwrap_or_default().to_string();
    if !emu.attributes.lock().unwrap().insert((collection, key.clone())) {
        return error_reply(
            StatusCode::CONFLICT,
            "attribute_already_exists",
            "Attribute with the requested key already exists.",
        );
    }
    (StatusCode::ACCEPTED, Json(json!({ "key": key, "status": "processing" })))
}

/// Démarre l'émulateur sur un port libre et renvoie l'endpoint `http://.../v1`.
pub async fn spawn_emulator() -> (String, Arc<Emulator>) {
    let emu = Arc::new(Emulator::default());
    let app = Router::new()
        .route("/v1/databases/{db}/collections", post(create_collection))
        .route(
            "/v1/databases/{db}/collections/{collection}/attributes/{kind}",
            post(create_attribute),
        )
        .with_state(Arc::clone(&emu));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind émulateur");
    let addr = listener.local_addr().expect("adresse émulateur");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("émulateur arrêté");
    });

    (format!("http://{}/v1", addr), emu)
}

pub fn test_config(endpoint: &str) -> ProvisionConfig {
    ProvisionConfig {
        endpoint: endpoint.to_string(),
        project_id: TEST_PROJECT.to_string(),
        api_key: TEST_KEY.to_string(),
        database_id: TEST_DB.to_string(),
        timeout: Duration::from_secs(5),
        pacing: PacingPolicy::none(),
    }
}
