//! Favorites service — list and toggle over a [`FavoritesStore`].

use star_core::favorites::{FavoritesStore, parse_star_id};
use tracing::debug;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{FavoritesResponse, ToggleFavoriteResponse};

/// Star ids favorited by `owner_id`.
pub async fn list(favorites: &dyn FavoritesStore, owner_id: Uuid) -> AppResult<FavoritesResponse> {
    let star_ids = favorites
        .list(owner_id)
        .await?
        .into_iter()
        .map(|f| f.star_id)
        .collect();
    Ok(FavoritesResponse { star_ids })
}

/// Validate the raw `starId` and flip its membership for `owner_id`.
pub async fn toggle(
    favorites: &dyn FavoritesStore,
    owner_id: Uuid,
    raw_star_id: Option<&serde_json::Value>,
) -> AppResult<ToggleFavoriteResponse> {
    let star_id = parse_star_id(raw_star_id)?;
    let outcome = favorites.toggle(owner_id, star_id).await?;
    debug!(%owner_id, star_id, favorited = outcome.favorited, "favorite toggled");
    Ok(ToggleFavoriteResponse {
        favorited: outcome.favorited,
        star_id: outcome.star_id,
    })
}
