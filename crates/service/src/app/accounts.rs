//! Registration, login and caller resolution.

use stockroom_auth::{Caller, Identity, IdentityView, hash_password};
use stockroom_core::{CompanyId, IdentityId};
use stockroom_tenancy::{Registration, TenantRegistration};

use crate::app::AppServices;
use crate::errors::{ServiceError, ServiceResult};

impl AppServices {
    /// Register a new tenant: one USER identity plus the company it owns.
    ///
    /// Both records are persisted as one unit; a duplicate username writes
    /// nothing.
    pub fn register(&self, registration: &Registration) -> ServiceResult<IdentityView> {
        // Fast path; the store re-checks under its own lock.
        if self.store.find_identity_by_username(&registration.username)?.is_some() {
            return Err(ServiceError::DuplicateUsername);
        }

        let password_hash = hash_password(&registration.password)?;
        let tenant = TenantRegistration::build(registration, password_hash)?;
        let view = tenant.identity.view();

        self.store.register_tenant(tenant.identity, tenant.company)?;

        tracing::info!(
            username = %view.username,
            company_id = ?view.company_id,
            "tenant registered"
        );
        Ok(view)
    }

    /// Exchange credentials for a signed token carrying the identity's role.
    pub fn login(&self, username: &str, password: &str) -> ServiceResult<String> {
        let identity = self.credentials.authenticate(username, password).map_err(|err| {
            tracing::info!(error = %err, "login rejected");
            ServiceError::from(err)
        })?;

        let token = self.tokens.issue(&identity.username, identity.role)?;
        tracing::info!(username = %identity.username, role = %identity.role, "login succeeded");
        Ok(token)
    }

    /// Resolve the caller behind a bearer token.
    ///
    /// The identity is re-read so the caller carries its current company
    /// link; a deleted identity or a role that no longer matches fails.
    pub fn authenticate(&self, token: &str) -> ServiceResult<Caller> {
        let claims = self.tokens.validate(token).map_err(|err| {
            tracing::debug!(error = %err, "token rejected");
            ServiceError::from(err)
        })?;

        let identity = self
            .store
            .find_identity_by_username(&claims.subject)?
            .ok_or(ServiceError::AuthenticationFailed)?;

        if identity.role != claims.role {
            tracing::warn!(
                username = %identity.username,
                token_role = %claims.role,
                stored_role = %identity.role,
                "token role does not match stored role"
            );
            return Err(ServiceError::AuthenticationFailed);
        }

        Ok(Caller::from_identity(&identity))
    }

    /// The caller's own identity record, without credentials.
    pub fn current_identity(&self, caller: &Caller) -> ServiceResult<IdentityView> {
        self.store
            .find_identity_by_username(caller.username())?
            .map(|identity| identity.view())
            .ok_or(ServiceError::NotFound("identity"))
    }

    pub fn own_company_id(&self, caller: &Caller) -> ServiceResult<CompanyId> {
        caller.company_id().ok_or(ServiceError::NotFound("company"))
    }

    /// Create an ADMIN identity with no company.
    pub fn provision_admin(&self, username: &str, password: &str) -> ServiceResult<IdentityView> {
        let password_hash = hash_password(password)?;
        let identity = Identity::new_admin(IdentityId::new(), username, password_hash)?;
        let view = identity.view();

        self.store.insert_identity(identity)?;

        tracing::info!(username = %view.username, "administrator provisioned");
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use stockroom_auth::Role;

    use crate::ServiceConfig;

    fn services() -> AppServices {
        AppServices::build(&ServiceConfig::new("test-secret", Duration::minutes(10)))
    }

    fn registration(username: &str) -> Registration {
        Registration {
            username: username.to_string(),
            password: "pw".to_string(),
            company_name: format!("{username} Ltd"),
            capacity: "10".to_string(),
            location: "Leeds".to_string(),
        }
    }

    #[test]
    fn register_then_login_resolves_caller_with_company() {
        let services = services();
        let view = services.register(&registration("alice")).unwrap();

        let token = services.login("alice", "pw").unwrap();
        let caller = services.authenticate(&token).unwrap();

        assert_eq!(caller.username(), "alice");
        assert_eq!(caller.role(), Role::User);
        assert_eq!(caller.company_id(), view.company_id);
        assert_eq!(services.own_company_id(&caller).ok(), view.company_id);
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let services = services();
        services.register(&registration("alice")).unwrap();
        let err = services.register(&registration("alice")).unwrap_err();
        assert_eq!(err, ServiceError::DuplicateUsername);
    }

    #[test]
    fn empty_password_is_a_validation_failure() {
        let services = services();
        let mut req = registration("alice");
        req.password = String::new();
        assert!(matches!(services.register(&req), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn admin_has_no_company() {
        let services = services();
        services.provision_admin("root", "pw").unwrap();
        let caller = services.authenticate(&services.login("root", "pw").unwrap()).unwrap();
        assert!(caller.is_admin());
        assert_eq!(
            services.own_company_id(&caller).unwrap_err(),
            ServiceError::NotFound("company")
        );
        assert_eq!(services.current_identity(&caller).unwrap().role, Role::Admin);
    }

    #[test]
    fn token_with_stale_role_is_rejected() {
        let services = services();
        services.register(&registration("alice")).unwrap();
        let forged = services.tokens().issue("alice", Role::Admin).unwrap();
        assert_eq!(
            services.authenticate(&forged).unwrap_err(),
            ServiceError::AuthenticationFailed
        );
    }

    #[test]
    fn login_failure_hides_whether_user_exists() {
        let services = services();
        services.register(&registration("alice")).unwrap();
        let unknown = services.login("bob", "pw").unwrap_err();
        let wrong = services.login("alice", "nope").unwrap_err();
        assert_eq!(unknown, ServiceError::AuthenticationFailed);
        assert_eq!(unknown, wrong);
    }
}
