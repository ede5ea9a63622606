//! Mapping of service failures onto the JSON envelope and an HTTP status.

use crate::app::{IngestionError, MenuError};
use crate::domain::upload::ParseError;
use crate::domain::validation::RowValidationError;
use crate::infra::auth::AuthError;
use crate::storage::StoreError;
use crate::transport::http::types::{ApiResponse, AppState, FieldError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

pub const INTERNAL_ERROR: &str = "Internal server error";

/// Rejection message for an upload above `max_file_bytes`.
pub fn file_too_large(max_file_bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;
    let limit = if max_file_bytes % MB == 0 {
        format!("{}MB", max_file_bytes / MB)
    } else if max_file_bytes % KB == 0 {
        format!("{}KB", max_file_bytes / KB)
    } else {
        format!("{max_file_bytes} bytes")
    };
    format!("File too large. Maximum size is {limit}.")
}

/// Error envelope with the internal detail still attached.
///
/// Travels as a response extension; only [`reveal_error_detail`] may put it on
/// the wire.
#[derive(Clone)]
struct DetailedBody(ApiResponse);

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest {
        message: String,
        detail: Option<String>,
    },

    #[error("{message}")]
    InvalidFields {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("Validation errors found in menu data")]
    RowValidation {
        errors: Vec<RowValidationError>,
        valid_items: usize,
    },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            detail: None,
        }
    }

    pub fn field(message: &str, field: &str, problem: &str) -> Self {
        ApiError::InvalidFields {
            message: message.to_string(),
            errors: vec![FieldError {
                field: field.to_string(),
                message: problem.to_string(),
            }],
        }
    }

    pub fn internal(detail: impl ToString) -> Self {
        ApiError::Internal {
            message: INTERNAL_ERROR.to_string(),
            detail: detail.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. }
            | ApiError::InvalidFields { .. }
            | ApiError::RowValidation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnsupportedFormat => ApiError::bad_request(err.to_string()),
            ParseError::MalformedInput { format, reason } => ApiError::BadRequest {
                message: format!("Invalid {format} format"),
                detail: Some(reason),
            },
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Constraint { kind, detail } => ApiError::BadRequest {
                message: kind.message().to_string(),
                detail: Some(detail),
            },
            StoreError::Timeout => ApiError::internal("storage operation timed out"),
            StoreError::Database(e) => ApiError::Internal {
                message: "Database error occurred".to_string(),
                detail: e.to_string(),
            },
        }
    }
}

impl From<IngestionError> for ApiError {
    fn from(err: IngestionError) -> Self {
        match err {
            IngestionError::EmptyPayload => ApiError::bad_request(err.to_string()),
            IngestionError::InvalidMenu(problem) => {
                ApiError::field("Validation failed", "title", problem)
            }
            IngestionError::ValidationFailed {
                row_errors,
                valid_items,
            } => ApiError::RowValidation {
                errors: row_errors,
                valid_items,
            },
            IngestionError::Persistence(e) => e.into(),
        }
    }
}

impl From<MenuError> for ApiError {
    fn from(err: MenuError) -> Self {
        match err {
            MenuError::NotFound | MenuError::NoAvailableItems => {
                ApiError::NotFound(err.to_string())
            }
            MenuError::Store(e) => e.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Missing | AuthError::Invalid | AuthError::Expired => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::Issue(_) | AuthError::Hash(_) => ApiError::internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = match self {
            ApiError::BadRequest { message, detail } => ApiResponse {
                error: detail,
                ..ApiResponse::failure(message)
            },
            ApiError::InvalidFields { message, errors } => ApiResponse {
                errors: serde_json::to_value(errors).ok(),
                ..ApiResponse::failure(message)
            },
            ApiError::RowValidation {
                errors,
                valid_items,
            } => ApiResponse {
                errors: serde_json::to_value(errors).ok(),
                valid_items_count: Some(valid_items),
                ..ApiResponse::failure("Validation errors found in menu data")
            },
            ApiError::Unauthorized(message) | ApiError::NotFound(message) => {
                ApiResponse::failure(message)
            }
            ApiError::Internal { message, detail } => ApiResponse {
                error: Some(detail),
                ..ApiResponse::failure(message)
            },
        };

        let redacted = ApiResponse {
            error: None,
            ..body.clone()
        };
        let mut response = (status, Json(redacted)).into_response();
        if body.error.is_some() {
            response.extensions_mut().insert(DetailedBody(body));
        }
        response
    }
}

/// Response mapper that restores internal error detail on development servers.
pub async fn reveal_error_detail(
    State(state): State<AppState>,
    mut response: Response,
) -> Response {
    match response.extensions_mut().remove::<DetailedBody>() {
        Some(DetailedBody(body)) if state.development => {
            (response.status(), Json(body)).into_response()
        }
        _ => response,
    }
}
