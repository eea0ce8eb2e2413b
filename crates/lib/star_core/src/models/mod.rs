//! Domain models shared by the stores and the API layer.

pub mod auth;
pub mod favorites;
