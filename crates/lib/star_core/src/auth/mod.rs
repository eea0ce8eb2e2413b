//! Authentication logic.
//!
//! Provides password hashing, session-token management, and the credential
//! store seam shared by the Postgres and in-memory backends.

pub mod jwt;
pub mod password;
pub mod queries;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::auth::{NewUser, User, UserCredentials};

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid email or password")]
    CredentialError,

    #[error("Invalid or expired token")]
    TokenError,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Persistence for identities.
///
/// Implementations must enforce email uniqueness themselves: `create_user`
/// returns [`AuthError::Conflict`] when the normalized email is taken, even if
/// a concurrent caller inserted it after any earlier existence check.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new identity and return its public projection.
    async fn create_user(&self, new_user: NewUser<'_>) -> Result<User, AuthError>;

    /// Public projection by normalized email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Internal projection (with hash) by normalized email. Login only.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, AuthError>;
}

/// Canonical form of an email used as the login key: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
