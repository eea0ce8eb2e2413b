//! # star_core
//!
//! Core identity and favorites logic for Strawberry Star.

pub mod auth;
pub mod favorites;
pub mod memory;
pub mod migrate;
pub mod models;
pub mod postgres;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
