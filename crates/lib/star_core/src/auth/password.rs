//! Password hashing via bcrypt.

use super::AuthError;

/// Default bcrypt cost factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Hash a password with bcrypt at the given cost.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(password, cost).map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, hash).map_err(|e| AuthError::Internal(format!("bcrypt verify: {e}")))
}

/// Hash of a throwaway password at `cost`. Login verifies against it when no
/// identity matches, so unknown emails take as long as wrong passwords.
pub fn decoy_hash(cost: u32) -> Result<String, AuthError> {
    hash_password("strawberry-star-login-decoy", cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Lowest cost bcrypt accepts; keeps the tests fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn hash_then_verify_accepts_same_password() {
        let hash = hash_password("pass1234", TEST_COST).unwrap();
        assert!(verify_password("pass1234", &hash).unwrap());
        assert!(!verify_password("pass12345", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("pass1234", TEST_COST).unwrap();
        let b = hash_password("pass1234", TEST_COST).unwrap();
        assert_ne!(a, b);
        assert!(!a.contains("pass1234"));
    }

    #[test]
    fn decoy_hash_uses_requested_cost_and_rejects_real_passwords() {
        let decoy = decoy_hash(TEST_COST).unwrap();
        assert!(decoy.starts_with("$2b$04$"));
        assert!(!verify_password("pass1234", &decoy).unwrap());
        assert!(!verify_password("", &decoy).unwrap());
    }

    #[test]
    fn invalid_cost_is_an_internal_error() {
        let err = hash_password("pass1234", 1).unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
    }

    #[test]
    fn malformed_hash_is_an_internal_error() {
        let err = verify_password("pass1234", "not-a-bcrypt-hash").unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
