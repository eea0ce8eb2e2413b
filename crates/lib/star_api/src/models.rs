//! Request and response bodies (camelCase on the wire).

use serde::{Deserialize, Serialize};

/// `POST /api/auth/register` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Older clients send this as `username`.
    #[serde(alias = "username")]
    pub display_name: Option<String>,
}

/// `POST /api/auth/login` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User as returned to clients. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Successful register/login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

/// `GET /api/favorites` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponse {
    pub star_ids: Vec<i64>,
}

/// `POST /api/favorites/toggle` body. `starId` stays raw JSON so that
/// non-numeric input is reported as a validation error, not a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteRequest {
    pub star_id: Option<serde_json::Value>,
}

/// `POST /api/favorites/toggle` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteResponse {
    pub favorited: bool,
    pub star_id: i64,
}

/// Shared error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}
