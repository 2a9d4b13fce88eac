use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockroom_auth::Identity;
use stockroom_core::{CompanyId, EmployeeId, Entity, ExpectedVersion, IdentityId, InventoryItemId, TenantOwned};
use stockroom_inventory::InventoryItem;
use stockroom_tenancy::{Company, Employee};

use super::{CascadeSummary, EntityStore, ItemFilter, StoreError, StoreResult};

/// A company together with everything it owns.
#[derive(Debug)]
struct TenantRecord {
    company: Company,
    employees: BTreeMap<EmployeeId, Employee>,
    items: BTreeMap<InventoryItemId, InventoryItem>,
}

#[derive(Debug, Default)]
struct Tables {
    identities: HashMap<IdentityId, Identity>,
    usernames: HashMap<String, IdentityId>,
    tenants: BTreeMap<CompanyId, TenantRecord>,
    // Child id -> owning company, for lookups by child id.
    employee_owner: HashMap<EmployeeId, CompanyId>,
    item_owner: HashMap<InventoryItemId, CompanyId>,
}

impl Tables {
    fn add_identity(&mut self, identity: Identity) -> StoreResult<()> {
        if self.usernames.contains_key(&identity.username) {
            return Err(StoreError::DuplicateUsername(identity.username));
        }
        self.usernames.insert(identity.username.clone(), identity.id);
        self.identities.insert(identity.id, identity);
        Ok(())
    }

    fn tenant_mut(&mut self, company_id: CompanyId) -> StoreResult<&mut TenantRecord> {
        self.tenants
            .get_mut(&company_id)
            .ok_or(StoreError::NotFound("company"))
    }
}

/// In-memory entity store for tests/dev.
///
/// A single lock over all tables makes every trait method one transaction.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    inner: RwLock<Tables>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }
}

impl EntityStore for InMemoryEntityStore {
    fn find_identity_by_username(&self, username: &str) -> StoreResult<Option<Identity>> {
        let tables = self.read()?;
        Ok(tables
            .usernames
            .get(username)
            .and_then(|id| tables.identities.get(id))
            .cloned())
    }

    fn insert_identity(&self, identity: Identity) -> StoreResult<()> {
        self.write()?.add_identity(identity)
    }

    fn register_tenant(&self, identity: Identity, company: Company) -> StoreResult<()> {
        let mut tables = self.write()?;
        if tables.tenants.contains_key(&company.id) {
            return Err(StoreError::Conflict(format!("company {} already exists", company.id)));
        }
        // Checked before anything is written, so a duplicate leaves no company behind.
        tables.add_identity(identity)?;
        tables.tenants.insert(
            company.id,
            TenantRecord {
                company,
                employees: BTreeMap::new(),
                items: BTreeMap::new(),
            },
        );
        Ok(())
    }

    fn get_company(&self, id: CompanyId) -> StoreResult<Option<Company>> {
        Ok(self.read()?.tenants.get(&id).map(|t| t.company.clone()))
    }

    fn list_companies(&self) -> StoreResult<Vec<Company>> {
        Ok(self.read()?.tenants.values().map(|t| t.company.clone()).collect())
    }

    fn save_company(&self, company: Company) -> StoreResult<Company> {
        let mut tables = self.write()?;
        let record = tables.tenant_mut(company.id)?;
        record.company = company.clone();
        Ok(company)
    }

    fn delete_company(&self, id: CompanyId) -> StoreResult<CascadeSummary> {
        let mut tables = self.write()?;
        let record = tables.tenants.remove(&id).ok_or(StoreError::NotFound("company"))?;

        for employee_id in record.employees.keys() {
            tables.employee_owner.remove(employee_id);
        }
        for item_id in record.items.keys() {
            tables.item_owner.remove(item_id);
        }

        let owner_removed = match tables.identities.remove(&record.company.owner_id) {
            Some(owner) => {
                tables.usernames.remove(&owner.username);
                true
            }
            None => false,
        };

        let summary = CascadeSummary {
            employees: record.employees.len(),
            items: record.items.len(),
            owner_removed,
        };
        tracing::debug!(company_id = %id, ?summary, "company removed with owned records");
        Ok(summary)
    }

    fn get_employee(&self, id: EmployeeId) -> StoreResult<Option<Employee>> {
        let tables = self.read()?;
        Ok(tables
            .employee_owner
            .get(&id)
            .and_then(|company_id| tables.tenants.get(company_id))
            .and_then(|t| t.employees.get(&id))
            .cloned())
    }

    fn employees_of(&self, company_id: CompanyId) -> StoreResult<Vec<Employee>> {
        let tables = self.read()?;
        let record = tables.tenants.get(&company_id).ok_or(StoreError::NotFound("company"))?;
        Ok(record.employees.values().cloned().collect())
    }

    fn insert_employee(&self, employee: Employee) -> StoreResult<Employee> {
        let mut tables = self.write()?;
        let id = *employee.id();
        if tables.employee_owner.contains_key(&id) {
            return Err(StoreError::Conflict(format!("employee {id} already exists")));
        }
        let company_id = employee.company_id();
        tables.tenant_mut(company_id)?.employees.insert(id, employee.clone());
        tables.employee_owner.insert(id, company_id);
        Ok(employee)
    }

    fn update_employee(&self, employee: Employee) -> StoreResult<Employee> {
        let mut tables = self.write()?;
        let id = *employee.id();
        // A concurrent delete wins: the update must not resurrect the record.
        let company_id = *tables
            .employee_owner
            .get(&id)
            .ok_or(StoreError::NotFound("employee"))?;
        if company_id != employee.company_id() {
            return Err(StoreError::Conflict(format!(
                "employee {id} belongs to another company"
            )));
        }
        let slot = tables
            .tenant_mut(company_id)?
            .employees
            .get_mut(&id)
            .ok_or(StoreError::NotFound("employee"))?;
        *slot = employee.clone();
        Ok(employee)
    }

    fn delete_employee(&self, id: EmployeeId) -> StoreResult<()> {
        let mut tables = self.write()?;
        let company_id = tables
            .employee_owner
            .remove(&id)
            .ok_or(StoreError::NotFound("employee"))?;
        tables.tenant_mut(company_id)?.employees.remove(&id);
        Ok(())
    }

    fn get_item(&self, id: InventoryItemId) -> StoreResult<Option<InventoryItem>> {
        let tables = self.read()?;
        Ok(tables
            .item_owner
            .get(&id)
            .and_then(|company_id| tables.tenants.get(company_id))
            .and_then(|t| t.items.get(&id))
            .cloned())
    }

    fn find_items(&self, company_id: CompanyId, filter: &ItemFilter) -> StoreResult<Vec<InventoryItem>> {
        let tables = self.read()?;
        let record = tables.tenants.get(&company_id).ok_or(StoreError::NotFound("company"))?;
        Ok(record
            .items
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    fn insert_item(&self, item: InventoryItem) -> StoreResult<InventoryItem> {
        let mut tables = self.write()?;
        let id = *item.id();
        if tables.item_owner.contains_key(&id) {
            return Err(StoreError::Conflict(format!("inventory item {id} already exists")));
        }
        let company_id = item.company_id();
        let stored = item.with_version(1);
        tables.tenant_mut(company_id)?.items.insert(id, stored.clone());
        tables.item_owner.insert(id, company_id);
        Ok(stored)
    }

    fn save_item(&self, item: InventoryItem, expected: ExpectedVersion) -> StoreResult<InventoryItem> {
        let mut tables = self.write()?;
        let id = *item.id();
        let company_id = *tables
            .item_owner
            .get(&id)
            .ok_or(StoreError::NotFound("inventory item"))?;
        if company_id != item.company_id() {
            return Err(StoreError::Conflict(format!(
                "inventory item {id} belongs to another company"
            )));
        }

        let record = tables.tenant_mut(company_id)?;
        let current = record
            .items
            .get(&id)
            .map(|i| i.version())
            .ok_or(StoreError::NotFound("inventory item"))?;
        expected
            .check(current)
            .map_err(|e| StoreError::Conflict(e.to_string()))?;

        let stored = item.with_version(current + 1);
        record.items.insert(id, stored.clone());
        Ok(stored)
    }

    fn delete_item(&self, id: InventoryItemId) -> StoreResult<()> {
        let mut tables = self.write()?;
        let company_id = tables
            .item_owner
            .remove(&id)
            .ok_or(StoreError::NotFound("inventory item"))?;
        tables.tenant_mut(company_id)?.items.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_inventory::{ItemUpdate, NewItem};
    use stockroom_tenancy::NewEmployee;

    fn tenant(username: &str) -> (Identity, Company) {
        let identity_id = IdentityId::new();
        let company_id = CompanyId::new();
        let identity = Identity::new_user(identity_id, username, "hash".to_string(), company_id).unwrap();
        let company = Company::new(company_id, identity_id, format!("{username} Ltd"), "10", "Leeds").unwrap();
        (identity, company)
    }

    fn item(company_id: CompanyId, name: &str) -> InventoryItem {
        InventoryItem::create_blank(
            InventoryItemId::new(),
            company_id,
            NewItem {
                product_name: name.to_string(),
                description: String::new(),
                price: 1.5,
                minimum_stock: 2,
                buffer_stock: 2,
            },
        )
        .unwrap()
    }

    fn employee(company_id: CompanyId) -> Employee {
        Employee::hire(
            EmployeeId::new(),
            company_id,
            NewEmployee {
                name: "Jane".to_string(),
                grade: String::new(),
                dept: String::new(),
                salary: 1.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn duplicate_registration_leaves_no_orphan_company() {
        let store = InMemoryEntityStore::new();
        let (identity, company) = tenant("alice");
        store.register_tenant(identity, company).unwrap();

        let (dup_identity, dup_company) = tenant("alice");
        let dup_company_id = dup_company.id;
        let err = store.register_tenant(dup_identity, dup_company).unwrap_err();

        assert_eq!(err, StoreError::DuplicateUsername("alice".to_string()));
        assert_eq!(store.get_company(dup_company_id).unwrap(), None);
        assert_eq!(store.list_companies().unwrap().len(), 1);
    }

    #[test]
    fn delete_company_cascades_to_children_and_owner() {
        let store = InMemoryEntityStore::new();
        let (identity, company) = tenant("alice");
        let company_id = company.id;
        store.register_tenant(identity, company).unwrap();

        let emp = store.insert_employee(employee(company_id)).unwrap();
        let widget = store.insert_item(item(company_id, "Widget")).unwrap();

        let summary = store.delete_company(company_id).unwrap();
        assert_eq!(
            summary,
            CascadeSummary {
                employees: 1,
                items: 1,
                owner_removed: true,
            }
        );
        assert_eq!(store.get_employee(emp.id).unwrap(), None);
        assert_eq!(store.get_item(*widget.id()).unwrap(), None);
        assert_eq!(store.find_identity_by_username("alice").unwrap(), None);
    }

    #[test]
    fn stale_item_write_is_rejected() {
        let store = InMemoryEntityStore::new();
        let (identity, company) = tenant("alice");
        let company_id = company.id;
        store.register_tenant(identity, company).unwrap();

        let stored = store.insert_item(item(company_id, "Widget")).unwrap();
        assert_eq!(stored.version(), 1);

        let update = ItemUpdate {
            opening_stock: Some(4),
            ..ItemUpdate::default()
        };
        let first = stored.apply_update(&update).unwrap();
        let second = stored.apply_update(&update).unwrap();

        let saved = store.save_item(first, ExpectedVersion::Exact(1)).unwrap();
        assert_eq!(saved.version(), 2);

        let err = store.save_item(second, ExpectedVersion::Exact(1)).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn item_filters_are_company_scoped() {
        let store = InMemoryEntityStore::new();
        let (a_identity, a_company) = tenant("alice");
        let (b_identity, b_company) = tenant("bob");
        let (a, b) = (a_company.id, b_company.id);
        store.register_tenant(a_identity, a_company).unwrap();
        store.register_tenant(b_identity, b_company).unwrap();

        let stocked = store.insert_item(item(a, "Blue Widget")).unwrap();
        let stocked = stocked
            .apply_update(&ItemUpdate {
                opening_stock: Some(50),
                ..ItemUpdate::default()
            })
            .unwrap();
        store.save_item(stocked, ExpectedVersion::Exact(1)).unwrap();
        store.insert_item(item(a, "Red Gadget")).unwrap();
        store.insert_item(item(b, "Green Widget")).unwrap();

        let widgets = store
            .find_items(a, &ItemFilter::ProductNameContains("Widget".to_string()))
            .unwrap();
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0].product_name(), "Blue Widget");

        let empty = store.find_items(a, &ItemFilter::OutOfStock).unwrap();
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].product_name(), "Red Gadget");

        // New items are created flagged; the stocked one no longer is.
        let reorder = store.find_items(a, &ItemFilter::Reorder).unwrap();
        assert_eq!(reorder.len(), 1);
        assert_eq!(reorder[0].product_name(), "Red Gadget");

        assert_eq!(store.find_items(b, &ItemFilter::All).unwrap().len(), 1);
    }

    #[test]
    fn children_require_an_existing_company() {
        let store = InMemoryEntityStore::new();
        let missing = CompanyId::new();
        assert_eq!(
            store.insert_employee(employee(missing)).unwrap_err(),
            StoreError::NotFound("company")
        );
        assert_eq!(
            store.insert_item(item(missing, "Widget")).unwrap_err(),
            StoreError::NotFound("company")
        );
    }

    #[test]
    fn update_after_delete_does_not_resurrect_employee() {
        let store = InMemoryEntityStore::new();
        let (identity, company) = tenant("alice");
        let company_id = company.id;
        store.register_tenant(identity, company).unwrap();

        let stored = store.insert_employee(employee(company_id)).unwrap();
        let stale = store.get_employee(stored.id).unwrap().unwrap();
        store.delete_employee(stored.id).unwrap();

        assert_eq!(
            store.update_employee(stale).unwrap_err(),
            StoreError::NotFound("employee")
        );
        assert_eq!(store.get_employee(stored.id).unwrap(), None);
        assert!(store.employees_of(company_id).unwrap().is_empty());
    }

    #[test]
    fn inserting_an_existing_employee_id_conflicts() {
        let store = InMemoryEntityStore::new();
        let (identity, company) = tenant("alice");
        let company_id = company.id;
        store.register_tenant(identity, company).unwrap();

        let stored = store.insert_employee(employee(company_id)).unwrap();
        assert!(matches!(
            store.insert_employee(stored).unwrap_err(),
            StoreError::Conflict(_)
        ));
    }
}
