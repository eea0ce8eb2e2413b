//! Favorites domain models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A single (owner, star) membership record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub owner_id: Uuid,
    pub star_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Result of a toggle: the membership state after the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub favorited: bool,
    pub star_id: i64,
}
