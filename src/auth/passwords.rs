use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::domain::errors::DomainError;

/// Hash a plain-text password with Argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::Internal(format!("password hashing failed: {e}")))
}

/// Check a plain-text password against a stored hash. A mismatch is `Ok(false)`;
/// an unparsable stored hash is an error, not an authentication failure.
pub fn verify_password(hash: &str, password: &str) -> Result<bool, DomainError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| DomainError::Internal(format!("stored password hash is invalid: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("hunter22").expect("hash failed");
        assert!(verify_password(&hash, "hunter22").expect("verify failed"));
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = hash_password("hunter22").expect("hash failed");
        assert!(!verify_password(&hash, "hunter23").expect("verify failed"));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same password").expect("hash failed");
        let b = hash_password("same password").expect("hash failed");
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_stored_hash_is_an_error() {
        assert!(verify_password("not-a-hash", "anything").is_err());
    }
}
