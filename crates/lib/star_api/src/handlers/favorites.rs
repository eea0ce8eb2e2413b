//! Favorites request handlers. Both require a valid session token.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use star_core::favorites::INVALID_STAR_ID;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{FavoritesResponse, ToggleFavoriteRequest, ToggleFavoriteResponse};
use crate::services::favorites;

/// `GET /api/favorites` — star ids favorited by the caller.
pub async fn list_favorites_handler(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<FavoritesResponse>> {
    let resp = favorites::list(state.favorites.as_ref(), claims.id).await?;
    Ok(Json(resp))
}

/// `POST /api/favorites/toggle` — add or remove a favorite.
pub async fn toggle_favorite_handler(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    body: Result<Json<ToggleFavoriteRequest>, JsonRejection>,
) -> AppResult<Json<ToggleFavoriteResponse>> {
    let body = match body {
        Ok(Json(body)) => body,
        // Only a non-object body gets here; `starId` itself is untyped.
        Err(JsonRejection::JsonDataError(_)) => {
            return Err(AppError::Validation(INVALID_STAR_ID.into()));
        }
        Err(rejection) => return Err(rejection.into()),
    };
    let resp = favorites::toggle(state.favorites.as_ref(), claims.id, body.star_id.as_ref()).await?;
    Ok(Json(resp))
}
