//! Tenant registration: one new identity plus the company it owns.

use serde::Deserialize;

use stockroom_auth::Identity;
use stockroom_core::{CompanyId, DomainResult, IdentityId};

use crate::Company;

/// Sign-up request.
#[derive(Clone, Deserialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub company_name: String,
    #[serde(default)]
    pub capacity: String,
    #[serde(default)]
    pub location: String,
}

impl core::fmt::Debug for Registration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("company_name", &self.company_name)
            .field("capacity", &self.capacity)
            .field("location", &self.location)
            .finish()
    }
}

/// A linked identity/company pair, ready to be persisted as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct TenantRegistration {
    pub identity: Identity,
    pub company: Company,
}

impl TenantRegistration {
    /// Build the pair with fresh ids, linked in both directions.
    ///
    /// `password_hash` must already be a one-way hash of `registration.password`.
    pub fn build(registration: &Registration, password_hash: String) -> DomainResult<Self> {
        let identity_id = IdentityId::new();
        let company_id = CompanyId::new();

        let identity = Identity::new_user(
            identity_id,
            registration.username.clone(),
            password_hash,
            company_id,
        )?;
        let company = Company::new(
            company_id,
            identity_id,
            registration.company_name.clone(),
            registration.capacity.clone(),
            registration.location.clone(),
        )?;

        Ok(Self { identity, company })
    }
}
