//! Password hashing using Argon2.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Argon2, Params,
};
use hearth_core::{HearthError, HearthResult};
use std::sync::Arc;
use tracing::debug;

/// Password hasher service using Argon2id.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Arc<Argon2<'static>>,
}

impl PasswordHasher {
    /// Creates a new password hasher with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    /// Creates a new password hasher with custom parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        Self {
            argon2: Arc::new(argon2),
        }
    }

    /// Creates a password hasher from a cost parameter (memory cost in MB).
    #[must_use]
    pub fn with_cost(cost: u32) -> Self {
        let params = Params::new(
            cost * 1024, // Memory cost in KB
            3,           // Time cost (iterations)
            1,           // Parallelism
            None,        // Output length (default)
        )
        .unwrap_or(Params::DEFAULT);

        Self::with_params(params)
    }

    /// Hashes a password.
    pub fn hash(&self, password: &str) -> HearthResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| HearthError::Internal(format!("Failed to hash password: {}", e)))?;

        debug!("Password hashed successfully");
        Ok(hash.to_string())
    }

    /// Verifies a password against a hash.
    pub fn verify(&self, password: &str, hash: &str) -> HearthResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| HearthError::Internal(format!("Invalid password hash format: {}", e)))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed: incorrect password");
                Ok(false)
            }
            Err(e) => Err(HearthError::Internal(format!(
                "Password verification error: {}",
                e
            ))),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

/// Validates password strength.
pub fn validate_password_strength(password: &str) -> Result<(), Vec<&'static str>> {
    let mut errors = Vec::new();

    if password.len() < 6 {
        errors.push("Password must be at least 6 characters long");
    }

    if password.len() > 128 {
        errors.push("Password must be at most 128 characters long");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::with_cost(1);
        let password = "my-secure-password";

        let hash = hasher.hash(password).unwrap();
        assert!(hasher.verify(password, &hash).unwrap());
        assert!(!hasher.verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes() {
        let hasher = PasswordHasher::with_cost(1);
        let password = "test-password";

        let hash1 = hasher.hash(password).unwrap();
        let hash2 = hasher.hash(password).unwrap();

        // Same password should produce different hashes (different salts)
        assert_ne!(hash1, hash2);

        assert!(hasher.verify(password, &hash1).unwrap());
        assert!(hasher.verify(password, &hash2).unwrap());
    }

    #[test]
    fn test_invalid_hash_format_returns_error() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "not-a-valid-hash");
        assert!(result.is_err());
    }

    #[test]
    fn test_password_strength_validation() {
        assert!(validate_password_strength("secret1").is_ok());
        assert!(validate_password_strength("short").is_err());
        assert!(validate_password_strength(&"x".repeat(129)).is_err());
    }
}
