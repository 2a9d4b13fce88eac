//! `stockroom-service` — request-scoped application services.
//!
//! Layout:
//! - `config.rs`: process-wide settings (signing secret, token lifetime)
//! - `errors.rs`: the single error taxonomy surfaced to callers
//! - `credentials.rs`: store-backed credential verifier
//! - `app/`: [`AppServices`] and its operations, one file per area
//!
//! Every operation takes the authenticated [`stockroom_auth::Caller`]
//! explicitly; nothing reads ambient request state.

pub mod app;
pub mod config;
pub mod credentials;
pub mod errors;

pub use app::AppServices;
pub use config::ServiceConfig;
pub use credentials::StoreCredentialVerifier;
pub use errors::{ServiceError, ServiceResult};
