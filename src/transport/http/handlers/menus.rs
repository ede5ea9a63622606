use crate::transport::http::auth::AuthUser;
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

/// Menu ids are positive integers; anything else is rejected before touching the store.
pub fn parse_menu_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| ApiError::bad_request("Invalid menu ID"))
}

fn data<T: Serialize>(value: T) -> Result<Json<ApiResponse>, ApiError> {
    let value = serde_json::to_value(value).map_err(ApiError::internal)?;
    Ok(Json(ApiResponse::ok(value)))
}

#[utoipa::path(
    get,
    path = "/api/menu",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Menus of the caller, newest first, with item_count, avg_price and total_sales", body = ApiResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ApiResponse)
    )
)]
pub async fn list_menus_handler(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse>, ApiError> {
    data(state.menus.list_menus(user.id).await?)
}

#[utoipa::path(
    get,
    path = "/api/menu/{id}",
    params(("id" = i64, Path, description = "Menu id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Menu with stats and items", body = ApiResponse),
        (status = 400, description = "Invalid menu ID", body = ApiResponse),
        (status = 404, description = "Menu not found", body = ApiResponse)
    )
)]
pub async fn get_menu_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let menu_id = parse_menu_id(&id)?;
    data(state.menus.get_menu(user.id, menu_id).await?)
}

#[utoipa::path(
    delete,
    path = "/api/menu/{id}",
    params(("id" = i64, Path, description = "Menu id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Menu and its items deleted", body = ApiResponse),
        (status = 400, description = "Invalid menu ID", body = ApiResponse),
        (status = 404, description = "Menu not found", body = ApiResponse)
    )
)]
pub async fn delete_menu_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let menu_id = parse_menu_id(&id)?;
    state.menus.delete_menu(user.id, menu_id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Menu deleted successfully",
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/menu/{id}/insights",
    params(("id" = i64, Path, description = "Menu id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Overview, recommendations and per-item analysis", body = ApiResponse),
        (status = 400, description = "Invalid menu ID", body = ApiResponse),
        (status = 404, description = "Menu not found or has no items", body = ApiResponse)
    )
)]
pub async fn menu_insights_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let menu_id = parse_menu_id(&id)?;
    data(state.menus.insights(user.id, menu_id).await?)
}
