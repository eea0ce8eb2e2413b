//! Session gate — Bearer token extraction and JWT verification.
//!
//! Protected handlers take an [`AuthenticatedUser`] argument; axum runs the
//! gate before the handler body and rejects the request with a 401 if it fails.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use star_core::auth::jwt::TokenKeys;
use star_core::models::auth::TokenClaims;

use crate::AppState;
use crate::error::AppError;

/// Rejection message when no usable `Authorization` header is present.
pub const NO_TOKEN: &str = "No token provided";

/// Claims of the caller, resolved from the token alone (no store lookup).
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Run the gate against a header map.
pub fn authenticate(headers: &HeaderMap, keys: &TokenKeys) -> Result<TokenClaims, AppError> {
    let token = bearer_token(headers).ok_or_else(|| AppError::Unauthorized(NO_TOKEN.into()))?;
    Ok(keys.verify(token)?)
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, &state.tokens).map(AuthenticatedUser)
    }
}
