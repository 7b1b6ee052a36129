//! Argon2id password hashing.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

use crate::error::SyntraServiceError;

/// Hash a password into a PHC-format Argon2id string for storage.
pub fn hash_password(password: &str) -> Result<String, SyntraServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SyntraServiceError::Internal(anyhow::anyhow!("hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a submitted password against a stored PHC string.
///
/// A malformed stored hash is an internal error, not a credential failure —
/// it means the row was corrupted, not that the caller guessed wrong.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, SyntraServiceError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| SyntraServiceError::Internal(anyhow::anyhow!("parse stored hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
