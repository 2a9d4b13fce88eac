//! Access control decision point.
//!
//! Policy, in precedence order:
//! 1. `ADMIN` callers are allowed every operation on every company.
//! 2. Operations marked admin-only are denied to everyone else.
//! 3. Otherwise the caller must own the target company.
//!
//! Employee and inventory operations are decided against the company that
//! owns the entity, resolved by the caller before asking here.

use serde::Serialize;
use thiserror::Error;

use stockroom_core::CompanyId;

use crate::{Caller, Role};

/// An operation subject to access control.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListAllCompanies,
    ViewCompany,
    UpdateCompany,
    DeleteCompany,
    ListEmployees,
    AddEmployee,
    UpdateEmployee,
    DeleteEmployee,
    ListInventory,
    AddInventory,
    UpdateInventory,
    DeleteInventory,
}

impl Operation {
    pub const ALL: [Operation; 12] = [
        Operation::ListAllCompanies,
        Operation::ViewCompany,
        Operation::UpdateCompany,
        Operation::DeleteCompany,
        Operation::ListEmployees,
        Operation::AddEmployee,
        Operation::UpdateEmployee,
        Operation::DeleteEmployee,
        Operation::ListInventory,
        Operation::AddInventory,
        Operation::UpdateInventory,
        Operation::DeleteInventory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ListAllCompanies => "companies.list_all",
            Operation::ViewCompany => "companies.view",
            Operation::UpdateCompany => "companies.update",
            Operation::DeleteCompany => "companies.delete",
            Operation::ListEmployees => "employees.list",
            Operation::AddEmployee => "employees.add",
            Operation::UpdateEmployee => "employees.update",
            Operation::DeleteEmployee => "employees.delete",
            Operation::ListInventory => "inventory.list",
            Operation::AddInventory => "inventory.add",
            Operation::UpdateInventory => "inventory.update",
            Operation::DeleteInventory => "inventory.delete",
        }
    }

    /// Operations that no tenant owner may perform, even on their own company.
    pub fn is_admin_only(&self) -> bool {
        matches!(self, Operation::ListAllCompanies | Operation::DeleteCompany)
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an operation is aimed at.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "company_id")]
pub enum AccessTarget {
    /// Cross-tenant operations (e.g. listing every company).
    AllCompanies,
    Company(CompanyId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("access denied: '{0}' requires the ADMIN role")]
    AdminOnly(Operation),

    #[error("access denied: caller is not linked to a company")]
    NoCompany,

    #[error("access denied: target belongs to another tenant")]
    ForeignTenant,
}

impl AccessError {
    pub fn kind(&self) -> DenialKind {
        match self {
            AccessError::AdminOnly(_) => DenialKind::AdminOnly,
            AccessError::NoCompany => DenialKind::NoCompany,
            AccessError::ForeignTenant => DenialKind::ForeignTenant,
        }
    }
}

/// Decide whether `caller` may perform `operation` on `target`.
///
/// - No IO
/// - No panics
/// - A caller without a company is a defined denial, not a fault
pub fn authorize(caller: &Caller, operation: Operation, target: AccessTarget) -> Result<(), AccessError> {
    if caller.is_admin() {
        return Ok(());
    }

    if operation.is_admin_only() {
        return Err(AccessError::AdminOnly(operation));
    }

    let own = caller.company_id().ok_or(AccessError::NoCompany)?;

    match target {
        AccessTarget::Company(company_id) if company_id == own => Ok(()),
        _ => Err(AccessError::ForeignTenant),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an access decision, suitable for audit logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessExplanation {
    pub operation: &'static str,
    pub granted: bool,
    pub reason: String,
    pub caller: CallerState,
    pub target: AccessTarget,
    pub denial: Option<DenialKind>,
}

/// The caller facts the decision was based on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallerState {
    pub username: String,
    pub role: Role,
    pub company_id: Option<CompanyId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    AdminOnly,
    NoCompany,
    ForeignTenant,
}

/// Explain why `authorize` allows or denies a request.
///
/// Always agrees with [`authorize`]; the reason text is for operators only and
/// must not be sent back to the caller.
pub fn explain_access(caller: &Caller, operation: Operation, target: AccessTarget) -> AccessExplanation {
    let decision = authorize(caller, operation, target);

    let reason = match &decision {
        Ok(()) if caller.is_admin() => "caller holds the ADMIN role".to_string(),
        Ok(()) => "caller owns the target company".to_string(),
        Err(AccessError::AdminOnly(op)) => format!("'{op}' is restricted to ADMIN callers"),
        Err(AccessError::NoCompany) => "caller has no company to scope the request to".to_string(),
        Err(AccessError::ForeignTenant) => match (caller.company_id(), target) {
            (Some(own), AccessTarget::Company(other)) => {
                format!("caller owns company {own} but the target is company {other}")
            }
            _ => "target is outside the caller's tenant".to_string(),
        },
    };

    AccessExplanation {
        operation: operation.as_str(),
        granted: decision.is_ok(),
        reason,
        caller: CallerState {
            username: caller.username().to_string(),
            role: caller.role(),
            company_id: caller.company_id(),
        },
        target,
        denial: decision.err().map(|e| e.kind()),
    }
}
