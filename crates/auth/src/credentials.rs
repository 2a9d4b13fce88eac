//! Credential verification seam.
//!
//! The application layer supplies the lookup; this crate only defines the
//! contract and the error shape callers see.

use thiserror::Error;

use crate::Identity;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown username or wrong password; deliberately indistinguishable.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The credential source could not be reached.
    #[error("credential source unavailable: {0}")]
    Unavailable(String),
}

/// Validate a username/password pair against stored credentials.
pub trait CredentialVerifier: Send + Sync {
    fn authenticate(&self, username: &str, password: &str) -> Result<Identity, AuthError>;
}
