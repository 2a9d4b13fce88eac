//! Stateless, signed identity tokens (HS256 JWT).
//!
//! There is no token store: a token is valid exactly when its signature
//! verifies under the process-wide secret and it has not expired. Rotating the
//! secret invalidates every outstanding token.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::{JwtClaims, TokenError, validate_claims};
use crate::Role;

/// Identity extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub subject: String,
    pub role: Role,
}

/// Issue/validate contract used by the application layer.
pub trait TokenService: Send + Sync {
    fn issue_at(&self, subject: &str, role: Role, now: DateTime<Utc>) -> Result<String, TokenError>;

    fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenIdentity, TokenError>;

    fn issue(&self, subject: &str, role: Role) -> Result<String, TokenError> {
        self.issue_at(subject, role, Utc::now())
    }

    fn validate(&self, token: &str) -> Result<TokenIdentity, TokenError> {
        self.validate_at(token, Utc::now())
    }
}

/// HMAC-SHA256 token service keyed by a shared secret.
pub struct Hs256TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl Hs256TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by `validate_claims` against an injected clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl TokenService for Hs256TokenService {
    fn issue_at(&self, subject: &str, role: Role, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = JwtClaims::new(subject, role, now, self.ttl);
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenIdentity, TokenError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        validate_claims(&data.claims, now)?;

        Ok(TokenIdentity {
            subject: data.claims.sub,
            role: data.claims.role,
        })
    }
}
