//! Access-control enforcement at the operation boundary.
//!
//! Denials are logged with the full audit explanation; callers only ever see
//! `ServiceError::AccessDenied`.

use stockroom_auth::{AccessTarget, Caller, Operation, authorize, explain_access};
use stockroom_core::TenantOwned;

use crate::errors::{ServiceError, ServiceResult};

/// Check `operation` on `target` for `caller`.
pub fn guard(caller: &Caller, operation: Operation, target: AccessTarget) -> ServiceResult<()> {
    authorize(caller, operation, target).map_err(|err| {
        let explanation = explain_access(caller, operation, target);
        tracing::warn!(
            username = caller.username(),
            operation = explanation.operation,
            denial = ?explanation.denial,
            reason = %explanation.reason,
            "access denied"
        );
        ServiceError::from(err)
    })
}

/// Authorize against an entity addressed by its own id.
///
/// The owning company is taken from the entity itself. A missing entity is
/// reported as `AccessDenied` to tenant callers, so a foreign id and an
/// unknown id look the same; ADMIN callers get `NotFound`.
pub fn guard_owned<T: TenantOwned>(
    caller: &Caller,
    operation: Operation,
    found: Option<T>,
    what: &'static str,
) -> ServiceResult<T> {
    match found {
        Some(entity) => {
            guard(caller, operation, AccessTarget::Company(entity.company_id()))?;
            Ok(entity)
        }
        None if caller.is_admin() => Err(ServiceError::NotFound(what)),
        None => {
            tracing::warn!(
                username = caller.username(),
                operation = operation.as_str(),
                "access denied: target not visible to caller"
            );
            Err(ServiceError::AccessDenied)
        }
    }
}
