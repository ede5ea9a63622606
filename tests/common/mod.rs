//! Shared harness: an API server on an ephemeral port over the in-memory store.

#![allow(dead_code)]

use menuiq::domain::model::{NewUser, UserId, DEFAULT_USER_ROLE};
use menuiq::domain::upload::RawRecord;
use menuiq::infra::{JwtManager, Settings, StorageBackend};
use menuiq::storage::{MemoryMenuStore, MenuStore};
use menuiq::transport;
use serde_json::Value as JsonValue;
use std::sync::Arc;

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub store: Arc<MemoryMenuStore>,
    pub settings: Settings,
    pub owner: UserId,
    pub token: String,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Registers another owner and returns a bearer token for it.
    pub async fn add_owner(&self, email: &str) -> (UserId, String) {
        let id = self
            .store
            .upsert_user(&test_user(email))
            .await
            .expect("create owner");
        (id, token_for(&self.settings, id))
    }
}

pub fn memory_settings() -> Settings {
    let mut settings = Settings::from_defaults().expect("default settings");
    settings.storage.backend = StorageBackend::Memory;
    settings.validate().expect("memory settings are valid");
    settings
}

pub fn test_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        role: DEFAULT_USER_ROLE.to_string(),
        restaurant_name: Some("Test Kitchen".to_string()),
    }
}

pub fn token_for(settings: &Settings, owner: UserId) -> String {
    JwtManager::new(&settings.auth.jwt_secret, settings.auth.token_ttl_secs)
        .generate_token(owner, DEFAULT_USER_ROLE)
        .expect("sign token")
}

/// Turns a `json!` object literal into a raw upload record.
pub fn record(value: JsonValue) -> RawRecord {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub async fn spawn_server() -> TestServer {
    spawn_server_with(memory_settings()).await
}

pub async fn spawn_server_with(settings: Settings) -> TestServer {
    let store = Arc::new(MemoryMenuStore::new());
    let owner = store
        .upsert_user(&test_user("owner@menuiq.test"))
        .await
        .expect("create owner");
    let token = token_for(&settings, owner);

    let state = transport::http::AppState::new(&settings, store.clone());
    let app = transport::http::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("http client"),
        store,
        settings,
        owner,
        token,
    }
}
