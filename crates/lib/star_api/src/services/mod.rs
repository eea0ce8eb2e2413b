//! Business flows invoked by the handlers.

pub mod auth;
pub mod favorites;
