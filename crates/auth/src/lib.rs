//! `stockroom-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from transport and storage: it issues
//! and validates tokens, hashes credentials, and decides access for an
//! explicitly passed caller. Nothing here reads ambient request state.

pub mod authorize;
pub mod claims;
pub mod credentials;
pub mod identity;
pub mod password;
pub mod principal;
pub mod roles;
pub mod token;

pub use authorize::{
    AccessError, AccessExplanation, AccessTarget, DenialKind, Operation, authorize, explain_access,
};
pub use claims::{JwtClaims, TokenError, validate_claims};
pub use credentials::{AuthError, CredentialVerifier};
pub use identity::{Identity, IdentityView};
pub use password::{PasswordError, hash_password, verify_absent_password, verify_password};
pub use principal::Caller;
pub use roles::{Role, UnknownRole};
pub use token::{Hs256TokenService, TokenIdentity, TokenService};
