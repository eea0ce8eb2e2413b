//! Request handlers.

pub mod auth;
pub mod favorites;

use crate::error::AppError;

/// Fallback for unknown routes, in the shared error shape.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}
