//! API server configuration.

use star_core::auth::password::DEFAULT_BCRYPT_COST;
use thiserror::Error;

/// Default HTTP listener address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default PostgreSQL connection URL.
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/strawberry_star";

/// Configuration errors. Any of these aborts startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET is not configured")]
    MissingJwtSecret,

    #[error("Invalid BCRYPT_COST '{0}': expected an integer between 4 and 31")]
    InvalidBcryptCost(String),
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Session token signing secret.
    pub jwt_secret: String,
    /// bcrypt cost factor applied to every new password hash.
    pub bcrypt_cost: u32,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable       | Default                                          |
    /// |----------------|--------------------------------------------------|
    /// | `BIND_ADDR`    | `127.0.0.1:3000`                                 |
    /// | `DATABASE_URL` | `postgres://localhost:5432/strawberry_star`      |
    /// | `JWT_SECRET`   | required                                         |
    /// | `BCRYPT_COST`  | `10`                                             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingJwtSecret)?;
        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => parse_bcrypt_cost(&raw)?,
            None => DEFAULT_BCRYPT_COST,
        };
        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            jwt_secret,
            bcrypt_cost,
        })
    }
}

/// Parse and range-check a bcrypt cost.
pub fn parse_bcrypt_cost(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|cost| (4..=31).contains(cost))
        .ok_or_else(|| ConfigError::InvalidBcryptCost(raw.to_string()))
}
