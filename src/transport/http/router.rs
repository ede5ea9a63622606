use crate::app::{IngestionReport, MenuDetail, MenuWithStats};
use crate::domain::insights::{
    InsightOverview, ItemInsight, MenuInsights, Performance, Priority, Profitability,
    Recommendation, RecommendationKind,
};
use crate::domain::model::{Menu, MenuItem, MenuSummary};
use crate::domain::stats::MenuStats;
use crate::domain::validation::RowValidationError;
use crate::transport::http::error::{reveal_error_detail, ApiError};
use crate::transport::http::handlers::{health, menus, upload};
use crate::transport::http::types::{
    ApiResponse, AppState, FieldError, UploadMenuForm, UploadedMenu,
};
use axum::extract::{DefaultBodyLimit, OriginalUri};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Room for the multipart framing and text fields around the file itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        upload::upload_menu_handler,
        menus::list_menus_handler,
        menus::get_menu_handler,
        menus::delete_menu_handler,
        menus::menu_insights_handler
    ),
    components(schemas(
        ApiResponse,
        FieldError,
        UploadMenuForm,
        UploadedMenu,
        IngestionReport,
        RowValidationError,
        Menu,
        MenuItem,
        MenuSummary,
        MenuStats,
        MenuWithStats,
        MenuDetail,
        MenuInsights,
        InsightOverview,
        Recommendation,
        RecommendationKind,
        Priority,
        ItemInsight,
        Performance,
        Profitability
    )),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

async fn not_found_handler(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(format!("Not found - {}", uri.path()))
}

pub fn create_router(app_state: AppState) -> Router {
    let body_limit = app_state.limits.max_file_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/menu", get(menus::list_menus_handler))
        .route("/api/menu/upload", post(upload::upload_menu_handler))
        .route(
            "/api/menu/:id",
            get(menus::get_menu_handler).delete(menus::delete_menu_handler),
        )
        .route("/api/menu/:id/insights", get(menus::menu_insights_handler))
        .fallback(not_found_handler)
        .layer(middleware::map_response_with_state(
            app_state.clone(),
            reveal_error_detail,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
