//! In-memory stores for tests and local demo mode.
//!
//! Uniqueness is enforced through `DashMap` entries, which lock the shard
//! holding the key for the duration of the check-and-write.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use crate::auth::{AuthError, CredentialStore};
use crate::favorites::{FavoritesError, FavoritesStore};
use crate::models::auth::{NewUser, User, UserCredentials};
use crate::models::favorites::{Favorite, ToggleOutcome};

/// Identities keyed by normalized email plus favorites keyed by `(owner, star)`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<String, UserCredentials>,
    favorites: DashMap<(Uuid, i64), Favorite>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn create_user(&self, new_user: NewUser<'_>) -> Result<User, AuthError> {
        match self.users.entry(new_user.email.to_lowercase()) {
            Entry::Occupied(_) => Err(AuthError::Conflict("Email already registered".into())),
            Entry::Vacant(slot) => {
                let user = User {
                    id: crate::uuid::uuidv7(),
                    email: new_user.email.to_string(),
                    display_name: new_user.display_name.map(str::to_string),
                    created_at: Utc::now(),
                };
                slot.insert(UserCredentials {
                    user: user.clone(),
                    password_hash: new_user.password_hash.to_string(),
                });
                Ok(user)
            }
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .get(&email.to_lowercase())
            .map(|entry| entry.user.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, AuthError> {
        Ok(self
            .users
            .get(&email.to_lowercase())
            .map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl FavoritesStore for MemoryStore {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Favorite>, FavoritesError> {
        let mut favorites: Vec<Favorite> = self
            .favorites
            .iter()
            .filter(|entry| entry.key().0 == owner_id)
            .map(|entry| entry.value().clone())
            .collect();
        favorites.sort_by_key(|f| (f.created_at, f.star_id));
        Ok(favorites)
    }

    async fn toggle(&self, owner_id: Uuid, star_id: i64) -> Result<ToggleOutcome, FavoritesError> {
        let favorited = match self.favorites.entry((owner_id, star_id)) {
            Entry::Occupied(existing) => {
                existing.remove();
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(Favorite {
                    owner_id,
                    star_id,
                    created_at: Utc::now(),
                });
                true
            }
        };
        Ok(ToggleOutcome { favorited, star_id })
    }
}
