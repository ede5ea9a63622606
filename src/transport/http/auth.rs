//! Bearer-token identity for menu routes.

use crate::domain::model::UserId;
use crate::infra::auth::AuthError;
use crate::transport::http::error::ApiError;
use crate::transport::http::types::AppState;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// The authenticated owner of the request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub role: String,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::Missing)?;
        let claims = state.jwt.validate_token(token)?;
        Ok(AuthUser {
            id: claims.owner(),
            role: claims.role,
        })
    }
}
