//! Authentication request handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::services::auth;

/// Unwrap a credentials body. A field of the wrong JSON type counts as missing.
fn credentials_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    match body {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::JsonDataError(_)) => {
            Err(AppError::Validation(auth::REQUIRED_FIELDS.into()))
        }
        Err(rejection) => Err(rejection.into()),
    }
}

/// `POST /api/auth/register` — create a new identity and return a session.
pub async fn register_handler(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let body = credentials_body(body)?;
    let resp = auth::register(
        state.users.as_ref(),
        &state.tokens,
        state.config.bcrypt_cost,
        body.email.as_deref(),
        body.password.as_deref(),
        body.display_name.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// `POST /api/auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<AuthResponse>> {
    let body = credentials_body(body)?;
    let resp = auth::login(
        state.users.as_ref(),
        &state.tokens,
        &state.login_decoy,
        body.email.as_deref(),
        body.password.as_deref(),
    )
    .await?;
    Ok(Json(resp))
}
