//! PostgreSQL-backed stores.
//!
//! `PgStore` implements [`crate::auth::CredentialStore`] (see
//! `auth::queries`) and [`crate::favorites::FavoritesStore`] (see
//! `favorites::queries`). Uniqueness is enforced by the schema in
//! `migrations/`, not by application-side checks.

use sqlx::PgPool;

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Stores backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Whether `err` is a unique-constraint violation reported by the database.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.as_ref() == UNIQUE_VIOLATION),
        _ => false,
    }
}
