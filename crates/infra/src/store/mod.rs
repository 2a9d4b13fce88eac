//! Entity store abstraction.
//!
//! Every method is one atomic unit: multi-entity writes (tenant registration,
//! cascading company deletion) either fully happen or leave no trace.
//! Read-modify-write on inventory items is bounded by an optimistic version
//! check, so concurrent writers cannot silently lose each other's updates.

use std::sync::Arc;

use thiserror::Error;

use stockroom_auth::Identity;
use stockroom_core::{CompanyId, EmployeeId, ExpectedVersion, InventoryItemId};
use stockroom_inventory::InventoryItem;
use stockroom_tenancy::{Company, Employee};

pub mod in_memory;

pub use in_memory::InMemoryEntityStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// Optimistic concurrency failure.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Company-scoped inventory queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemFilter {
    All,
    /// Case-sensitive substring match on the product name.
    ProductNameContains(String),
    /// `qty_in_stock == 0`.
    OutOfStock,
    /// Items whose reorder flag is set.
    Reorder,
}

impl ItemFilter {
    pub fn matches(&self, item: &InventoryItem) -> bool {
        match self {
            ItemFilter::All => true,
            ItemFilter::ProductNameContains(needle) => item.product_name().contains(needle.as_str()),
            ItemFilter::OutOfStock => item.qty_in_stock() == 0,
            ItemFilter::Reorder => item.is_reorder(),
        }
    }
}

/// What a cascading company delete removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeSummary {
    pub employees: usize,
    pub items: usize,
    pub owner_removed: bool,
}

pub trait EntityStore: Send + Sync {
    fn find_identity_by_username(&self, username: &str) -> StoreResult<Option<Identity>>;

    /// Insert a standalone identity (administrator provisioning).
    fn insert_identity(&self, identity: Identity) -> StoreResult<()>;

    /// Persist a freshly registered identity and its company as one unit.
    ///
    /// Fails with `DuplicateUsername` (and writes nothing) if the username is
    /// already taken at commit time.
    fn register_tenant(&self, identity: Identity, company: Company) -> StoreResult<()>;

    fn get_company(&self, id: CompanyId) -> StoreResult<Option<Company>>;

    fn list_companies(&self) -> StoreResult<Vec<Company>>;

    /// Overwrite an existing company's details.
    fn save_company(&self, company: Company) -> StoreResult<Company>;

    /// Delete a company with everything it owns, including its owner identity.
    fn delete_company(&self, id: CompanyId) -> StoreResult<CascadeSummary>;

    fn get_employee(&self, id: EmployeeId) -> StoreResult<Option<Employee>>;

    fn employees_of(&self, company_id: CompanyId) -> StoreResult<Vec<Employee>>;

    /// Insert a new employee; its company must exist.
    fn insert_employee(&self, employee: Employee) -> StoreResult<Employee>;

    /// Overwrite an existing employee.
    ///
    /// Fails with `NotFound` (and writes nothing) if the employee was deleted
    /// after it was read.
    fn update_employee(&self, employee: Employee) -> StoreResult<Employee>;

    fn delete_employee(&self, id: EmployeeId) -> StoreResult<()>;

    fn get_item(&self, id: InventoryItemId) -> StoreResult<Option<InventoryItem>>;

    fn find_items(&self, company_id: CompanyId, filter: &ItemFilter) -> StoreResult<Vec<InventoryItem>>;

    /// Insert a new item (stamped as version 1); its company must exist.
    fn insert_item(&self, item: InventoryItem) -> StoreResult<InventoryItem>;

    /// Write back an updated item if the stored version still matches.
    fn save_item(&self, item: InventoryItem, expected: ExpectedVersion) -> StoreResult<InventoryItem>;

    fn delete_item(&self, id: InventoryItemId) -> StoreResult<()>;
}

impl<S> EntityStore for Arc<S>
where
    S: EntityStore + ?Sized,
{
    fn find_identity_by_username(&self, username: &str) -> StoreResult<Option<Identity>> {
        (**self).find_identity_by_username(username)
    }

    fn insert_identity(&self, identity: Identity) -> StoreResult<()> {
        (**self).insert_identity(identity)
    }

    fn register_tenant(&self, identity: Identity, company: Company) -> StoreResult<()> {
        (**self).register_tenant(identity, company)
    }

    fn get_company(&self, id: CompanyId) -> StoreResult<Option<Company>> {
        (**self).get_company(id)
    }

    fn list_companies(&self) -> StoreResult<Vec<Company>> {
        (**self).list_companies()
    }

    fn save_company(&self, company: Company) -> StoreResult<Company> {
        (**self).save_company(company)
    }

    fn delete_company(&self, id: CompanyId) -> StoreResult<CascadeSummary> {
        (**self).delete_company(id)
    }

    fn get_employee(&self, id: EmployeeId) -> StoreResult<Option<Employee>> {
        (**self).get_employee(id)
    }

    fn employees_of(&self, company_id: CompanyId) -> StoreResult<Vec<Employee>> {
        (**self).employees_of(company_id)
    }

    fn insert_employee(&self, employee: Employee) -> StoreResult<Employee> {
        (**self).insert_employee(employee)
    }

    fn update_employee(&self, employee: Employee) -> StoreResult<Employee> {
        (**self).update_employee(employee)
    }

    fn delete_employee(&self, id: EmployeeId) -> StoreResult<()> {
        (**self).delete_employee(id)
    }

    fn get_item(&self, id: InventoryItemId) -> StoreResult<Option<InventoryItem>> {
        (**self).get_item(id)
    }

    fn find_items(&self, company_id: CompanyId, filter: &ItemFilter) -> StoreResult<Vec<InventoryItem>> {
        (**self).find_items(company_id, filter)
    }

    fn insert_item(&self, item: InventoryItem) -> StoreResult<InventoryItem> {
        (**self).insert_item(item)
    }

    fn save_item(&self, item: InventoryItem, expected: ExpectedVersion) -> StoreResult<InventoryItem> {
        (**self).save_item(item, expected)
    }

    fn delete_item(&self, id: InventoryItemId) -> StoreResult<()> {
        (**self).delete_item(id)
    }
}
