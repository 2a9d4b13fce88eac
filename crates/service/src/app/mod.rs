//! Application services.
//!
//! - `accounts.rs`: registration, login, caller resolution, admin provisioning
//! - `companies.rs`, `employees.rs`, `inventory.rs`: tenant-scoped operations
//! - `guard.rs`: access-control enforcement shared by every operation

use std::sync::Arc;

use stockroom_auth::{CredentialVerifier, Hs256TokenService, TokenService};
use stockroom_infra::{EntityStore, InMemoryEntityStore};

use crate::config::ServiceConfig;
use crate::credentials::StoreCredentialVerifier;

pub mod accounts;
pub mod companies;
pub mod employees;
pub mod guard;
pub mod inventory;

/// Shared collaborators for every request.
///
/// Cheap to clone; all state lives behind `Arc`s.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn EntityStore>,
    tokens: Arc<dyn TokenService>,
    credentials: Arc<dyn CredentialVerifier>,
}

impl AppServices {
    /// In-memory wiring (dev/test).
    pub fn build(config: &ServiceConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryEntityStore::new()))
    }

    /// Wire the default token service and credential verifier around `store`.
    pub fn with_store(config: &ServiceConfig, store: Arc<dyn EntityStore>) -> Self {
        let tokens = Arc::new(Hs256TokenService::new(
            config.jwt_secret.as_bytes(),
            config.token_ttl,
        ));
        let credentials = Arc::new(StoreCredentialVerifier::new(store.clone()));
        Self::from_parts(store, tokens, credentials)
    }

    pub fn from_parts(
        store: Arc<dyn EntityStore>,
        tokens: Arc<dyn TokenService>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            store,
            tokens,
            credentials,
        }
    }

    pub fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }

    pub fn tokens(&self) -> &dyn TokenService {
        self.tokens.as_ref()
    }
}
