//! Login identity record.

use serde::Serialize;

use stockroom_core::{CompanyId, DomainResult, Entity, IdentityId, require_non_blank};

use crate::Role;

/// An account that can log in.
///
/// A `USER` identity owns exactly one company; an `ADMIN` identity may own
/// none. `password_hash` is a PHC string and never leaves the process.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: IdentityId,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub company_id: Option<CompanyId>,
}

impl Identity {
    /// A tenant owner linked to `company_id`.
    pub fn new_user(
        id: IdentityId,
        username: impl Into<String>,
        password_hash: String,
        company_id: CompanyId,
    ) -> DomainResult<Self> {
        let username = username.into();
        require_non_blank("username", &username)?;
        Ok(Self {
            id,
            username,
            password_hash,
            role: Role::User,
            company_id: Some(company_id),
        })
    }

    /// A pre-provisioned administrator without a company.
    pub fn new_admin(
        id: IdentityId,
        username: impl Into<String>,
        password_hash: String,
    ) -> DomainResult<Self> {
        let username = username.into();
        require_non_blank("username", &username)?;
        Ok(Self {
            id,
            username,
            password_hash,
            role: Role::Admin,
            company_id: None,
        })
    }

    pub fn view(&self) -> IdentityView {
        IdentityView {
            id: self.id,
            username: self.username.clone(),
            role: self.role,
            company_id: self.company_id,
        }
    }
}

impl Entity for Identity {
    type Id = IdentityId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Debug for Identity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("company_id", &self.company_id)
            .finish()
    }
}

/// Outward-facing projection of an identity (no credential material).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityView {
    pub id: IdentityId,
    pub username: String,
    pub role: Role,
    pub company_id: Option<CompanyId>,
}
