//! Strawberry Star API server binary.
//!
//! Serves registration, login, and favorites over HTTP, backed by PostgreSQL
//! or (for local demos) an in-memory store.

use clap::{Parser, ValueEnum};
use sqlx::postgres::PgPoolOptions;
use star_api::config::{ApiConfig, ConfigError, DEFAULT_BIND_ADDR, DEFAULT_DATABASE_URL};
use star_core::auth::password::DEFAULT_BCRYPT_COST;
use tracing::{info, warn};

/// Storage backend for identities and favorites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Storage {
    /// PostgreSQL via `--database-url`; migrations run at startup.
    Postgres,
    /// Process-local maps; everything is lost on exit.
    Memory,
}

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "star_api_server", about = "Strawberry Star API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    bind_addr: String,

    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Storage backend.
    #[arg(long, value_enum, default_value_t = Storage::Postgres)]
    storage: Storage,

    /// Session token signing secret. Required.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,

    /// bcrypt cost factor for new password hashes (4-31).
    #[arg(long, env = "BCRYPT_COST", default_value_t = DEFAULT_BCRYPT_COST)]
    bcrypt_cost: u32,
}

impl Args {
    /// Validate through [`ApiConfig::from_lookup`], keyed like the environment.
    fn api_config(&self) -> Result<ApiConfig, ConfigError> {
        ApiConfig::from_lookup(|key| match key {
            "BIND_ADDR" => Some(self.bind_addr.clone()),
            "DATABASE_URL" => Some(self.database_url.clone()),
            "JWT_SECRET" => self.jwt_secret.clone(),
            "BCRYPT_COST" => Some(self.bcrypt_cost.to_string()),
            _ => None,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,star_api=debug,star_core=debug,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = args.api_config()?;

    info!(storage = ?args.storage, bind_addr = %config.bind_addr, "starting star_api_server");

    let state = match args.storage {
        Storage::Postgres => {
            info!(max_connections = args.max_connections, "configuring connection pool");
            let pool = PgPoolOptions::new()
                .max_connections(args.max_connections)
                .acquire_timeout(std::time::Duration::from_secs(30))
                .connect(&config.database_url)
                .await?;

            info!("running database migrations");
            star_api::migrate(&pool).await?;

            star_api::AppState::with_postgres(pool, config.clone())?
        }
        Storage::Memory => {
            warn!("in-memory storage: identities and favorites are lost on exit");
            star_api::AppState::in_memory(config.clone())?
        }
    };

    let app = star_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_secret_fails_config() {
        let args = Args::parse_from(["star_api_server", "--storage", "memory"]);
        if args.jwt_secret.is_none() {
            assert!(matches!(args.api_config(), Err(ConfigError::MissingJwtSecret)));
        }
    }

    #[test]
    fn explicit_args_build_config() {
        let args = Args::parse_from([
            "star_api_server",
            "--storage",
            "memory",
            "--jwt-secret",
            "s3cret",
            "--bcrypt-cost",
            "12",
            "--bind-addr",
            "0.0.0.0:8080",
        ]);
        assert_eq!(args.storage, Storage::Memory);
        let config = args.api_config().unwrap();
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn bcrypt_cost_out_of_range_is_rejected() {
        let args = Args::parse_from([
            "star_api_server",
            "--jwt-secret",
            "s3cret",
            "--bcrypt-cost",
            "2",
        ]);
        assert!(matches!(args.api_config(), Err(ConfigError::InvalidBcryptCost(_))));

        let result = Args::try_parse_from(["star_api_server", "--bcrypt-cost", "ten"]);
        assert!(result.is_err());
    }

    #[test]
    fn empty_secret_fails_config() {
        let args = Args::parse_from(["star_api_server", "--jwt-secret", ""]);
        assert!(matches!(args.api_config(), Err(ConfigError::MissingJwtSecret)));
    }
}
