use serde::Serialize;

use stockroom_core::CompanyId;

use crate::{Identity, Role};

/// The authenticated caller of a request.
///
/// Resolved once per request (token subject + the identity's current company
/// link) and passed explicitly into every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caller {
    username: String,
    role: Role,
    company_id: Option<CompanyId>,
}

impl Caller {
    pub fn new(username: impl Into<String>, role: Role, company_id: Option<CompanyId>) -> Self {
        Self {
            username: username.into(),
            role,
            company_id,
        }
    }

    pub fn from_identity(identity: &Identity) -> Self {
        Self::new(identity.username.clone(), identity.role, identity.company_id)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn company_id(&self) -> Option<CompanyId> {
        self.company_id
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
