//! `stockroom-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod version;

pub use entity::{Entity, TenantOwned};
pub use error::{DomainError, DomainResult, require_non_blank, require_non_negative_amount};
pub use id::{CompanyId, EmployeeId, IdentityId, InventoryItemId};
pub use version::ExpectedVersion;
