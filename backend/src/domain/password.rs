//! Credential hashing service.
//!
//! Wraps Argon2 so the rest of the domain only sees "hash" and "verify".
//! Raw passwords are never stored or logged; stored hashes are salted PHC
//! strings, so equal passwords still produce distinct hashes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use tracing::warn;

use super::error::Error;

/// One-way password hashing and verification.
#[derive(Debug, Clone, Default)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    /// Create a hasher with the library's default cost parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce a salted one-way hash of `raw` as a PHC string.
    ///
    /// # Errors
    /// Returns an internal error when the underlying primitive fails; the
    /// raw password is never included in the error.
    pub fn hash(&self, raw: &str) -> Result<String, Error> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|error| Error::internal(format!("password hashing failed: {error}")))
    }

    /// Verify `raw` against a stored PHC hash string.
    ///
    /// Malformed stored hashes verify as `false` rather than erroring; the
    /// account is then effectively locked until the credential is reset.
    #[must_use]
    pub fn verify(&self, raw: &str, stored: &str) -> bool {
        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(%error, "stored password hash failed to parse");
                return false;
            }
        };
        self.argon2.verify_password(raw.as_bytes(), &parsed).is_ok()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn hash_is_not_the_raw_password() {
        let hasher = CredentialHasher::new();
        let hash = hasher.hash("password123").expect("hashing succeeds");
        assert_ne!(hash, "password123");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn verify_accepts_matching_password() {
        let hasher = CredentialHasher::new();
        let hash = hasher.hash("password123").expect("hashing succeeds");
        assert!(hasher.verify("password123", &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hasher = CredentialHasher::new();
        let hash = hasher.hash("password123").expect("hashing succeeds");
        assert!(!hasher.verify("password124", &hash));
    }

    #[test]
    fn verify_rejects_malformed_stored_hash() {
        let hasher = CredentialHasher::new();
        assert!(!hasher.verify("password123", "not-a-phc-string"));
    }

    #[test]
    fn equal_passwords_hash_differently() {
        let hasher = CredentialHasher::new();
        let first = hasher.hash("password123").expect("hashing succeeds");
        let second = hasher.hash("password123").expect("hashing succeeds");
        assert_ne!(first, second);
    }
}
