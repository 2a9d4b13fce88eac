//! One-way credential hashing (Argon2id, PHC string format).

use std::sync::OnceLock;

use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password cannot be empty")]
    Empty,

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| PasswordError::Hashing(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Hashing(e.to_string()))?;
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hashing(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// Check a plaintext password against a stored PHC hash.
///
/// An unparseable stored hash never verifies.
pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Spend the same Argon2 work as [`verify_password`] without a stored hash.
///
/// Used when the username is unknown, so a rejected login takes as long as
/// a wrong password for a real account. Always returns `false`.
pub fn verify_absent_password(password: &str) -> bool {
    static ABSENT_HASH: OnceLock<Option<String>> = OnceLock::new();
    let hash = ABSENT_HASH.get_or_init(|| hash_password("stockroom-absent-account").ok());
    if let Some(hash) = hash {
        let _ = verify_password(hash, password);
    }
    false
}
