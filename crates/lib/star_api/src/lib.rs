//! # star_api
//!
//! HTTP API library for Strawberry Star: registration, login, and
//! token-gated favorites.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use sqlx::PgPool;
use star_core::auth::CredentialStore;
use star_core::auth::jwt::TokenKeys;
use star_core::auth::password::decoy_hash;
use star_core::favorites::FavoritesStore;
use star_core::memory::MemoryStore;
use star_core::postgres::PgStore;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::handlers::{auth, favorites};

/// Route paths.
pub mod routes {
    pub const POST_AUTH_REGISTER: &str = "/api/auth/register";
    pub const POST_AUTH_LOGIN: &str = "/api/auth/login";
    pub const GET_FAVORITES: &str = "/api/favorites";
    pub const POST_FAVORITES_TOGGLE: &str = "/api/favorites/toggle";
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Identity persistence.
    pub users: Arc<dyn CredentialStore>,
    /// Favorites persistence.
    pub favorites: Arc<dyn FavoritesStore>,
    /// Session token keys derived from `config.jwt_secret`.
    pub tokens: TokenKeys,
    /// bcrypt hash checked on logins for unknown emails.
    pub login_decoy: Arc<str>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Assemble state from explicit stores. Fails if the signing secret is empty
    /// or the bcrypt cost is out of range.
    pub fn new(
        users: Arc<dyn CredentialStore>,
        favorites: Arc<dyn FavoritesStore>,
        config: ApiConfig,
    ) -> Result<Self, AppError> {
        let tokens = TokenKeys::new(&config.jwt_secret)?;
        let login_decoy = decoy_hash(config.bcrypt_cost)?.into();
        Ok(Self {
            users,
            favorites,
            tokens,
            login_decoy,
            config,
        })
    }

    /// State backed by PostgreSQL.
    pub fn with_postgres(pool: PgPool, config: ApiConfig) -> Result<Self, AppError> {
        let store = Arc::new(PgStore::new(pool));
        Self::new(store.clone(), store, config)
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(config: ApiConfig) -> Result<Self, AppError> {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store, config)
    }
}

/// Run embedded database migrations.
///
/// Delegates to `star_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    star_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(routes::POST_AUTH_REGISTER, post(auth::register_handler))
        .route(routes::POST_AUTH_LOGIN, post(auth::login_handler))
        // Favorites handlers take `AuthenticatedUser`, which gates them.
        .route(routes::GET_FAVORITES, get(favorites::list_favorites_handler))
        .route(
            routes::POST_FAVORITES_TOGGLE,
            post(favorites::toggle_favorite_handler),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
