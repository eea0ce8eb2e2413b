//! Authentication service — register/login flows over a [`CredentialStore`].

use star_core::auth::jwt::TokenKeys;
use star_core::auth::password::{hash_password, verify_password};
use star_core::auth::{AuthError, CredentialStore, normalize_email};
use star_core::models::auth::{NewUser, User};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, AuthUser};

/// Message for absent, empty, or wrongly typed credentials.
pub(crate) const REQUIRED_FIELDS: &str = "email and password are required";

/// Check presence of both credentials and normalize the email.
fn require_credentials<'a>(
    email: Option<&str>,
    password: Option<&'a str>,
) -> AppResult<(String, &'a str)> {
    let email = email.map(normalize_email).unwrap_or_default();
    match password {
        Some(password) if !email.is_empty() && !password.is_empty() => Ok((email, password)),
        _ => Err(AppError::Validation(REQUIRED_FIELDS.into())),
    }
}

/// bcrypt is CPU-bound; keep it off the async workers.
async fn run_blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("blocking task: {e}")))?
        .map_err(AppError::from)
}

fn build_auth_response(user: &User, keys: &TokenKeys) -> AppResult<AuthResponse> {
    Ok(AuthResponse {
        token: keys.mint(user)?,
        user: AuthUser {
            id: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
        },
    })
}

/// Register a new identity and return a session for it.
pub async fn register(
    users: &dyn CredentialStore,
    keys: &TokenKeys,
    bcrypt_cost: u32,
    email: Option<&str>,
    password: Option<&str>,
    display_name: Option<&str>,
) -> AppResult<AuthResponse> {
    let (email, password) = require_credentials(email, password)?;

    // Fail fast before paying for a hash; the store's unique index still
    // decides races between concurrent registrations.
    if users.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let password = password.to_string();
    let password_hash = run_blocking(move || hash_password(&password, bcrypt_cost)).await?;

    let display_name = display_name.map(str::trim).filter(|n| !n.is_empty());
    let user = users
        .create_user(NewUser {
            email: &email,
            password_hash: &password_hash,
            display_name,
        })
        .await?;

    info!(user_id = %user.id, "registered new user");
    build_auth_response(&user, keys)
}

/// Authenticate with email + password.
///
/// Unknown email and wrong password produce the same error, and both pay for
/// one bcrypt verification: the unknown-email path checks `decoy_hash`.
pub async fn login(
    users: &dyn CredentialStore,
    keys: &TokenKeys,
    decoy_hash: &str,
    email: Option<&str>,
    password: Option<&str>,
) -> AppResult<AuthResponse> {
    let (email, password) = require_credentials(email, password)?;

    let Some(credentials) = users.find_credentials_by_email(&email).await? else {
        let password = password.to_string();
        let decoy = decoy_hash.to_string();
        run_blocking(move || verify_password(&password, &decoy)).await?;
        warn!("login rejected: unknown email");
        return Err(AuthError::CredentialError.into());
    };

    let password = password.to_string();
    let hash = credentials.password_hash.clone();
    if !run_blocking(move || verify_password(&password, &hash)).await? {
        warn!(user_id = %credentials.user.id, "login rejected: wrong password");
        return Err(AuthError::CredentialError.into());
    }

    info!(user_id = %credentials.user.id, "user logged in");
    build_auth_response(&credentials.user, keys)
}
