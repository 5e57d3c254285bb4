#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use noteful_api::config::{Environment, LogFormat, ServerConfig, StorageBackend};
use noteful_api::router::build_app_router;
use noteful_api::state::AppState;
use noteful_core::types::DbId;
use noteful_db::models::folder::{CreateFolder, Folder, UpdateFolder};
use noteful_db::models::note::{CreateNote, Note, UpdateNote};
use noteful_db::{FolderStore, MemoryStore, NoteStore, StoreError};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Build a test `ServerConfig` backed by in-memory storage.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: Environment::Development,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        storage: StorageBackend::Memory,
        database_url: None,
        database_max_connections: 5,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router over `store`.
pub fn build_test_app(store: MemoryStore) -> Router {
    build_test_app_with_config(store, test_config())
}

pub fn build_test_app_with_config(store: MemoryStore, config: ServerConfig) -> Router {
    build_app_router(AppState::in_memory(store, config))
}

/// Build the router over a store whose every operation fails.
pub fn build_failing_app(environment: Environment) -> Router {
    let config = ServerConfig {
        environment,
        ..test_config()
    };
    let state = AppState {
        folders: Arc::new(FailingStore),
        notes: Arc::new(FailingStore),
        pool: None,
        config: Arc::new(config),
    };
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert the four standard folders: Important, Super, Spangley, Other.
pub async fn seed_folders(store: &MemoryStore) -> Vec<Folder> {
    let mut folders = Vec::new();
    for name in ["Important", "Super", "Spangley", "Other"] {
        let input = CreateFolder {
            name: name.to_string(),
        };
        folders.push(FolderStore::insert(store, &input).await.unwrap());
    }
    folders
}

/// Insert three notes spread over the first two seeded folders.
pub async fn seed_notes(store: &MemoryStore, folders: &[Folder]) -> Vec<Note> {
    let fixtures = [
        ("Dogs", "Woof woof", 1, folders[0].id),
        ("Cats", "Meow", 2, folders[1].id),
        ("Pigs", "Oink", 3, folders[0].id),
    ];

    let mut notes = Vec::new();
    for (name, content, day, folder_id) in fixtures {
        let input = CreateNote {
            name: name.to_string(),
            content: Some(content.to_string()),
            date_modified: Some(Utc.with_ymd_and_hms(2019, 1, day, 0, 0, 0).unwrap()),
            folder_id,
        };
        notes.push(NoteStore::insert(store, &input).await.unwrap());
    }
    notes
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body)).await
}

pub async fn patch_json(app: &Router, uri: &str, body: &Value) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, body)).await
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Failing storage
// ---------------------------------------------------------------------------

/// Storage that fails every call, for exercising the 500 path.
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl FolderStore for FailingStore {
    async fn list(&self) -> Result<Vec<Folder>, StoreError> {
        Err(unavailable())
    }

    async fn get_by_id(&self, _id: DbId) -> Result<Option<Folder>, StoreError> {
        Err(unavailable())
    }

    async fn insert(&self, _input: &CreateFolder) -> Result<Folder, StoreError> {
        Err(unavailable())
    }

    async fn update(&self, _id: DbId, _input: &UpdateFolder) -> Result<u64, StoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: DbId) -> Result<u64, StoreError> {
        Err(unavailable())
    }
}

#[async_trait]
impl NoteStore for FailingStore {
    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        Err(unavailable())
    }

    async fn get_by_id(&self, _id: DbId) -> Result<Option<Note>, StoreError> {
        Err(unavailable())
    }

    async fn insert(&self, _input: &CreateNote) -> Result<Note, StoreError> {
        Err(unavailable())
    }

    async fn update(&self, _id: DbId, _input: &UpdateNote) -> Result<u64, StoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: DbId) -> Result<u64, StoreError> {
        Err(unavailable())
    }
}
