//! JWT session token generation and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::AuthError;
use crate::models::auth::{TokenClaims, User};

/// Session token lifetime: 7 days.
pub const TOKEN_EXPIRY_SECS: i64 = 7 * 24 * 60 * 60;

/// HS256 signing and verification keys derived from the server secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys").finish_non_exhaustive()
    }
}

impl TokenKeys {
    /// Build keys from the signing secret. An empty secret is a configuration
    /// fault, not something a request can cause.
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::Configuration(
                "JWT_SECRET is not configured".into(),
            ));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Mint a session token for `user`, expiring [`TOKEN_EXPIRY_SECS`] from now.
    pub fn mint(&self, user: &User) -> Result<String, AuthError> {
        self.mint_at(user, Utc::now())
    }

    /// Mint a session token as if issued at `now`.
    pub fn mint_at(&self, user: &User, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = TokenClaims {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            exp: (now + Duration::seconds(TOKEN_EXPIRY_SECS)).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
    }

    /// Verify a session token, returning the claims on success.
    ///
    /// Bad signature, malformed input and expiry all collapse to
    /// [`AuthError::TokenError`].
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<TokenClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                AuthError::TokenError
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "star@example.com".into(),
            display_name: Some("star".into()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_secret_is_a_configuration_error() {
        let err = TokenKeys::new("").unwrap_err();
        assert!(matches!(err, AuthError::Configuration(_)));
    }

    #[test]
    fn minted_token_verifies_back_to_claims() {
        let keys = TokenKeys::new("test-secret").unwrap();
        let user = user();
        let token = keys.mint(&user).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.id, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.display_name.as_deref(), Some("star"));
        assert_eq!(claims.exp - claims.iat, TOKEN_EXPIRY_SECS);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let minted = TokenKeys::new("secret-a").unwrap().mint(&user()).unwrap();
        let err = TokenKeys::new("secret-b").unwrap().verify(&minted).unwrap_err();
        assert!(matches!(err, AuthError::TokenError));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::new("test-secret").unwrap();
        let issued = Utc::now() - Duration::days(8);
        let token = keys.mint_at(&user(), issued).unwrap();
        assert!(matches!(keys.verify(&token), Err(AuthError::TokenError)));
    }

    #[test]
    fn token_six_days_old_is_still_valid() {
        let keys = TokenKeys::new("test-secret").unwrap();
        let issued = Utc::now() - Duration::days(6);
        let token = keys.mint_at(&user(), issued).unwrap();
        assert!(keys.verify(&token).is_ok());
    }

    #[test]
    fn garbage_and_tampered_tokens_are_rejected() {
        let keys = TokenKeys::new("test-secret").unwrap();
        assert!(matches!(keys.verify("not.a.jwt"), Err(AuthError::TokenError)));
        assert!(matches!(keys.verify(""), Err(AuthError::TokenError)));

        let mut token = keys.mint(&user()).unwrap();
        token.push('x');
        assert!(matches!(keys.verify(&token), Err(AuthError::TokenError)));
    }

    #[test]
    fn display_name_is_omitted_when_absent() {
        let keys = TokenKeys::new("test-secret").unwrap();
        let mut user = user();
        user.display_name = None;
        let claims = keys.verify(&keys.mint(&user).unwrap()).unwrap();
        assert_eq!(claims.display_name, None);
    }
}
