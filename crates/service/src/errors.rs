//! Service error taxonomy.
//!
//! Lower layers keep their own error types; they are folded into
//! [`ServiceError`] at the operation boundary. Token and credential failures
//! collapse into a single `AuthenticationFailed` so callers cannot tell an
//! unknown username from a wrong password or a forged token.

use thiserror::Error;

use stockroom_auth::{AccessError, AuthError, PasswordError, TokenError};
use stockroom_core::DomainError;
use stockroom_infra::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("access denied")]
    AccessDenied,

    #[error("username is already taken")]
    DuplicateUsername,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("validation failed: {0}")]
    Validation(String),

    /// Lost an optimistic-concurrency race; nothing was written.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable machine-readable code for a request boundary.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "not_found",
            ServiceError::AccessDenied => "forbidden",
            ServiceError::DuplicateUsername => "duplicate_username",
            ServiceError::AuthenticationFailed => "unauthorized",
            ServiceError::Validation(_) => "validation_error",
            ServiceError::Conflict(_) => "conflict",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::InvariantViolation(msg) | DomainError::InvalidId(msg) => {
                ServiceError::Validation(msg)
            }
            DomainError::NotFound => ServiceError::NotFound("entity"),
            DomainError::Conflict(msg) => ServiceError::Conflict(msg),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(_) => ServiceError::DuplicateUsername,
            StoreError::NotFound(what) => ServiceError::NotFound(what),
            StoreError::Conflict(msg) => ServiceError::Conflict(msg),
            StoreError::Unavailable(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<TokenError> for ServiceError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(msg) => ServiceError::Internal(msg),
            TokenError::Malformed | TokenError::Expired | TokenError::BadSignature => {
                ServiceError::AuthenticationFailed
            }
        }
    }
}

impl From<AccessError> for ServiceError {
    fn from(_: AccessError) -> Self {
        ServiceError::AccessDenied
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ServiceError::AuthenticationFailed,
            AuthError::Unavailable(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<PasswordError> for ServiceError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Empty => ServiceError::Validation(err.to_string()),
            PasswordError::Hashing(msg) => ServiceError::Internal(msg),
        }
    }
}
