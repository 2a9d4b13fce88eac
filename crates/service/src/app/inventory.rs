//! Inventory operations.
//!
//! Updates are read-modify-write: the item is loaded, revalued, and written
//! back only if nobody else wrote it in between.

use stockroom_auth::{AccessTarget, Caller, Operation};
use stockroom_core::{CompanyId, Entity, ExpectedVersion, InventoryItemId};
use stockroom_infra::ItemFilter;
use stockroom_inventory::{InventoryItem, ItemUpdate, NewItem};

use crate::app::AppServices;
use crate::app::guard::{guard, guard_owned};
use crate::errors::ServiceResult;

impl AppServices {
    pub fn add_inventory(&self, caller: &Caller, company_id: CompanyId, item: NewItem) -> ServiceResult<InventoryItem> {
        guard(caller, Operation::AddInventory, AccessTarget::Company(company_id))?;
        let blank = InventoryItem::create_blank(InventoryItemId::new(), company_id, item)?;
        let stored = self.store.insert_item(blank)?;
        tracing::debug!(item_id = %stored.id(), company_id = %company_id, "inventory item added");
        Ok(stored)
    }

    pub fn update_inventory(
        &self,
        caller: &Caller,
        item_id: InventoryItemId,
        update: &ItemUpdate,
    ) -> ServiceResult<InventoryItem> {
        let found = self.store.get_item(item_id)?;
        let current = guard_owned(caller, Operation::UpdateInventory, found, "inventory item")?;

        let expected = ExpectedVersion::Exact(current.version());
        let next = current.apply_update(update)?;
        let stored = self.store.save_item(next, expected)?;

        tracing::debug!(
            item_id = %item_id,
            version = stored.version(),
            qty_in_stock = stored.qty_in_stock(),
            is_reorder = stored.is_reorder(),
            "inventory item revalued"
        );
        Ok(stored)
    }

    pub fn delete_inventory(&self, caller: &Caller, item_id: InventoryItemId) -> ServiceResult<()> {
        let found = self.store.get_item(item_id)?;
        guard_owned(caller, Operation::DeleteInventory, found, "inventory item")?;
        self.store.delete_item(item_id)?;
        tracing::debug!(item_id = %item_id, "inventory item deleted");
        Ok(())
    }

    pub fn list_inventory(&self, caller: &Caller, company_id: CompanyId) -> ServiceResult<Vec<InventoryItem>> {
        self.find_inventory(caller, company_id, ItemFilter::All)
    }

    /// Items whose product name contains `needle` (case-sensitive).
    pub fn search_inventory(
        &self,
        caller: &Caller,
        company_id: CompanyId,
        needle: &str,
    ) -> ServiceResult<Vec<InventoryItem>> {
        self.find_inventory(caller, company_id, ItemFilter::ProductNameContains(needle.to_string()))
    }

    pub fn out_of_stock_inventory(&self, caller: &Caller, company_id: CompanyId) -> ServiceResult<Vec<InventoryItem>> {
        self.find_inventory(caller, company_id, ItemFilter::OutOfStock)
    }

    pub fn reorder_inventory(&self, caller: &Caller, company_id: CompanyId) -> ServiceResult<Vec<InventoryItem>> {
        self.find_inventory(caller, company_id, ItemFilter::Reorder)
    }

    fn find_inventory(
        &self,
        caller: &Caller,
        company_id: CompanyId,
        filter: ItemFilter,
    ) -> ServiceResult<Vec<InventoryItem>> {
        guard(caller, Operation::ListInventory, AccessTarget::Company(company_id))?;
        Ok(self.store.find_items(company_id, &filter)?)
    }
}
