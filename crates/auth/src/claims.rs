use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// JWT claims model.
///
/// `iat`/`exp` are registered claim names (seconds since the Unix epoch) so
/// any JWT-aware client can read the token's lifetime; `role` is a private
/// claim carrying the identity's role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject: the username the token was issued to.
    pub sub: String,

    pub role: Role,

    /// Issued-at timestamp (seconds).
    pub iat: i64,

    /// Expiration timestamp (seconds).
    pub exp: i64,
}

impl JwtClaims {
    pub fn new(subject: impl Into<String>, role: Role, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: subject.into(),
            role,
            iat,
            exp: iat.saturating_add(ttl.num_seconds()),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token could not be decoded, or its claims are structurally invalid.
    #[error("malformed token")]
    Malformed,

    #[error("token has expired")]
    Expired,

    /// The signature does not verify under the configured key.
    #[error("token signature does not verify")]
    BadSignature,

    #[error("token could not be signed: {0}")]
    Signing(String),
}

/// Deterministically validate the time window of decoded claims.
///
/// Signature verification happens before this, in the token service.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenError> {
    if claims.sub.is_empty() {
        return Err(TokenError::Malformed);
    }
    if claims.exp <= claims.iat {
        return Err(TokenError::Malformed);
    }
    // Issued in the future: the window itself is nonsense for this process.
    if now.timestamp() < claims.iat {
        return Err(TokenError::Malformed);
    }
    if now.timestamp() >= claims.exp {
        return Err(TokenError::Expired);
    }
    Ok(())
}
