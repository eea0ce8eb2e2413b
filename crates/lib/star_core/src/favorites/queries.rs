//! Favorites queries against PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use super::{FavoritesError, FavoritesStore};
use crate::models::favorites::{Favorite, ToggleOutcome};
use crate::postgres::PgStore;

#[async_trait]
impl FavoritesStore for PgStore {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Favorite>, FavoritesError> {
        let rows = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            "SELECT star_id, created_at FROM favorites \
             WHERE owner_id = $1 \
             ORDER BY created_at, star_id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(star_id, created_at)| Favorite {
                owner_id,
                star_id,
                created_at,
            })
            .collect())
    }

    async fn toggle(&self, owner_id: Uuid, star_id: i64) -> Result<ToggleOutcome, FavoritesError> {
        // Each statement is atomic on its own; the primary key decides races.
        let deleted = sqlx::query("DELETE FROM favorites WHERE owner_id = $1 AND star_id = $2")
            .bind(owner_id)
            .bind(star_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted > 0 {
            return Ok(ToggleOutcome {
                favorited: false,
                star_id,
            });
        }

        let inserted = sqlx::query(
            "INSERT INTO favorites (owner_id, star_id) VALUES ($1, $2) \
             ON CONFLICT (owner_id, star_id) DO NOTHING",
        )
        .bind(owner_id)
        .bind(star_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted == 0 {
            debug!(%owner_id, star_id, "concurrent toggle already inserted favorite");
        }

        Ok(ToggleOutcome {
            favorited: true,
            star_id,
        })
    }
}
