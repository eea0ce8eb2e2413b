//! Per-identity favorite stars with toggle semantics.
//!
//! Each `(owner, star)` pair is either absent or favorited; `toggle` is the
//! only transition and flips between the two.

pub mod queries;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::favorites::{Favorite, ToggleOutcome};

/// Favorites errors.
#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

/// Persistence for favorites.
///
/// `toggle` must be safe against concurrent duplicate calls for the same pair:
/// an insert that loses a race to another insert is a no-op that still
/// reports `favorited: true`, never a duplicate row or an error.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// All favorites of `owner_id`, oldest first.
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Favorite>, FavoritesError>;

    /// Flip membership of `star_id` for `owner_id`.
    async fn toggle(&self, owner_id: Uuid, star_id: i64) -> Result<ToggleOutcome, FavoritesError>;
}

/// Message for any `starId` that is not an integral JSON number.
pub const INVALID_STAR_ID: &str = "starId must be a finite integer";

/// Interpret a raw JSON `starId` as a catalog id.
///
/// Only JSON numbers with an integral value that fits in `i64` are accepted;
/// strings, `null`, fractions and out-of-range values are rejected.
pub fn parse_star_id(value: Option<&serde_json::Value>) -> Result<i64, FavoritesError> {
    let invalid = || FavoritesError::Validation(INVALID_STAR_ID.into());
    let number = value.and_then(serde_json::Value::as_number).ok_or_else(invalid)?;
    if let Some(id) = number.as_i64() {
        return Ok(id);
    }
    let in_range = |f: f64| f >= i64::MIN as f64 && f < i64::MAX as f64;
    match number.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && in_range(f) => Ok(f as i64),
        _ => Err(invalid()),
    }
}
