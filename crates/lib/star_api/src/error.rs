//! Application error types.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, m.as_str()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.as_str()),
            AppError::Configuration(detail) | AppError::Internal(detail) => {
                error!(error = %detail, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        let body = Json(ErrorResponse {
            status: "error".to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<star_core::auth::AuthError> for AppError {
    fn from(e: star_core::auth::AuthError) -> Self {
        use star_core::auth::AuthError;
        match e {
            AuthError::ValidationError(msg) => AppError::Validation(msg),
            AuthError::Conflict(msg) => AppError::Conflict(msg),
            AuthError::CredentialError | AuthError::TokenError => {
                AppError::Unauthorized(e.to_string())
            }
            AuthError::Configuration(msg) => AppError::Configuration(msg),
            AuthError::DbError(e) => AppError::Internal(e.to_string()),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<star_core::favorites::FavoritesError> for AppError {
    fn from(e: star_core::favorites::FavoritesError) -> Self {
        use star_core::favorites::FavoritesError;
        match e {
            FavoritesError::Validation(msg) => AppError::Validation(msg),
            FavoritesError::DbError(e) => AppError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use star_core::auth::AuthError;

    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn credential_and_token_errors_are_401() {
        let (status, json) = body_json(AuthError::CredentialError.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Invalid email or password");
        assert_eq!(json["status"], "error");

        let (status, json) = body_json(AuthError::TokenError.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn conflict_is_409() {
        let err = AuthError::Conflict("Email already registered".into());
        let (status, json) = body_json(err.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Email already registered");
    }

    #[tokio::test]
    async fn internal_details_are_not_leaked() {
        let err = AppError::Internal("connection refused at 10.0.0.3".into());
        let (status, json) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Internal server error");

        let (status, json) =
            body_json(AuthError::Configuration("JWT_SECRET is not configured".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Internal server error");
    }
}
