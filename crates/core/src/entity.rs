//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// An entity that belongs to exactly one tenant (company).
///
/// The owning company is what access decisions are made against for
/// employee and inventory operations.
pub trait TenantOwned: Entity {
    fn company_id(&self) -> crate::CompanyId;
}
