//! Credential store queries against PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{AuthError, CredentialStore};
use crate::models::auth::{NewUser, User, UserCredentials};
use crate::postgres::{PgStore, is_unique_violation};

type UserRow = (Uuid, String, Option<String>, DateTime<Utc>);

fn user_from_row((id, email, display_name, created_at): UserRow) -> User {
    User {
        id,
        email,
        display_name,
        created_at,
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn create_user(&self, new_user: NewUser<'_>) -> Result<User, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (email, password_hash, display_name) VALUES ($1, $2, $3) \
             RETURNING id, email, display_name, created_at",
        )
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::Conflict("Email already registered".into())
            } else {
                AuthError::DbError(e)
            }
        })?;
        Ok(user_from_row(row))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, display_name, created_at FROM users WHERE lower(email) = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(user_from_row))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, AuthError> {
        let row = sqlx::query_as::<_, (Uuid, String, Option<String>, DateTime<Utc>, String)>(
            "SELECT id, email, display_name, created_at, password_hash \
             FROM users WHERE lower(email) = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(
            |(id, email, display_name, created_at, password_hash)| UserCredentials {
                user: user_from_row((id, email, display_name, created_at)),
                password_hash,
            },
        ))
    }
}
