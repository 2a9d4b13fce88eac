use std::sync::Arc;

use stockroom_auth::{AuthError, CredentialVerifier, Identity, verify_absent_password, verify_password};
use stockroom_infra::EntityStore;

/// Verifies credentials against identities held in the entity store.
pub struct StoreCredentialVerifier {
    store: Arc<dyn EntityStore>,
}

impl StoreCredentialVerifier {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }
}

impl CredentialVerifier for StoreCredentialVerifier {
    fn authenticate(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = self
            .store
            .find_identity_by_username(username)
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        match identity {
            Some(identity) if verify_password(&identity.password_hash, password) => Ok(identity),
            Some(_) => Err(AuthError::InvalidCredentials),
            None => {
                // Unknown usernames cost the same Argon2 work as a wrong password.
                verify_absent_password(password);
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}
