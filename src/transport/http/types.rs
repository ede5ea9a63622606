use crate::app::{IngestionService, MenuService};
use crate::domain::insights::ThresholdInsightEngine;
use crate::infra::auth::JwtManager;
use crate::infra::config::Settings;
use crate::storage::MenuStore;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub ingestion: IngestionService,
    pub menus: MenuService,
    pub store: Arc<dyn MenuStore>,
    pub jwt: Arc<JwtManager>,
    pub limits: UploadLimits,
    /// Error responses include internal detail when set.
    pub development: bool,
}

impl AppState {
    /// Wires the services over `store` with the threshold insight rules.
    pub fn new(settings: &Settings, store: Arc<dyn MenuStore>) -> Self {
        Self {
            ingestion: IngestionService::new(store.clone(), settings.database.ingest_timeout()),
            menus: MenuService::new(store.clone(), Arc::new(ThresholdInsightEngine)),
            store,
            jwt: Arc::new(JwtManager::new(
                &settings.auth.jwt_secret,
                settings.auth.token_ttl_secs,
            )),
            limits: UploadLimits {
                max_file_bytes: settings.upload.max_file_bytes,
            },
            development: settings.server.development,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_file_bytes: usize,
}

/// Envelope shared by every response.
#[derive(Serialize, Debug, Clone, Default, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Vec<Object>)]
    pub errors: Option<JsonValue>,
    /// Internal detail, only in development mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "validItemsCount", skip_serializing_if = "Option::is_none")]
    pub valid_items_count: Option<usize>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn ok_with_message(message: impl Into<String>, data: Option<JsonValue>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
            ..Default::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Default::default()
        }
    }
}

/// A rejected form field, reported under `errors`.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Multipart body of `POST /api/menu/upload`.
#[allow(dead_code)]
#[derive(Deserialize, ToSchema)]
pub struct UploadMenuForm {
    /// CSV or JSON menu file, at most `upload.max_file_bytes`. The field may also be named `file`.
    #[serde(rename = "menuFile")]
    #[schema(value_type = String, format = Binary)]
    pub menu_file: Vec<u8>,
    /// Menu title, 1 to 255 characters.
    pub title: String,
    pub description: Option<String>,
}

/// `data` of a successful upload.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedMenu {
    pub menu_id: i64,
    pub items_processed: usize,
    pub title: String,
}
