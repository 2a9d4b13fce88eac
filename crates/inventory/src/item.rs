use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use stockroom_core::{
    CompanyId, DomainResult, Entity, InventoryItemId, TenantOwned, require_non_blank,
    require_non_negative_amount,
};

use crate::valuation::{StockMovement, valuate};

/// Reorder point given to a brand-new item before its first stock update.
pub const BOOTSTRAP_REORDER_POINT: u32 = 10;

/// Inventory item owned by a single company.
///
/// The derived figures (`closing_stock`, `reorder_point`, `stock_value`,
/// `is_reorder`) are only ever written by [`InventoryItem::create_blank`] and
/// [`InventoryItem::apply_update`]; `qty_in_stock` is not stored at all.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    id: InventoryItemId,
    company_id: CompanyId,
    product_name: String,
    description: String,
    price: f64,
    opening_stock: u32,
    receipts: u32,
    issues: u32,
    closing_stock: u32,
    minimum_stock: u32,
    buffer_stock: u32,
    reorder_point: u32,
    stock_value: f64,
    is_reorder: bool,
    version: u64,
}

/// Input for creating an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub minimum_stock: u32,
    #[serde(default)]
    pub buffer_stock: u32,
}

/// Partial update: `None` leaves a field untouched, `Some(0)` sets it to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemUpdate {
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub opening_stock: Option<u32>,
    pub receipts: Option<u32>,
    pub issues: Option<u32>,
    pub minimum_stock: Option<u32>,
    pub buffer_stock: Option<u32>,
}

/// Coarse stock state for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    Reorder,
    InStock,
}

impl InventoryItem {
    /// Create an item with every stock counter at zero.
    ///
    /// A new item starts flagged for reorder with the bootstrap reorder point;
    /// the regular rules only take over on the first update.
    pub fn create_blank(id: InventoryItemId, company_id: CompanyId, input: NewItem) -> DomainResult<Self> {
        require_non_blank("product_name", &input.product_name)?;
        require_non_negative_amount("price", input.price)?;

        Ok(Self {
            id,
            company_id,
            product_name: input.product_name,
            description: input.description,
            price: input.price,
            opening_stock: 0,
            receipts: 0,
            issues: 0,
            closing_stock: 0,
            minimum_stock: input.minimum_stock,
            buffer_stock: input.buffer_stock,
            reorder_point: BOOTSTRAP_REORDER_POINT,
            stock_value: 0.0,
            is_reorder: true,
            version: 0,
        })
    }

    /// Apply the present fields of `update`, then recompute every derived figure.
    ///
    /// Returns the updated item; `self` is left untouched, so a rejected update
    /// changes nothing.
    pub fn apply_update(&self, update: &ItemUpdate) -> DomainResult<Self> {
        let mut next = self.clone();

        if let Some(name) = &update.product_name {
            require_non_blank("product_name", name)?;
            next.product_name = name.clone();
        }
        if let Some(description) = &update.description {
            next.description = description.clone();
        }
        if let Some(price) = update.price {
            require_non_negative_amount("price", price)?;
            next.price = price;
        }
        if let Some(v) = update.opening_stock {
            next.opening_stock = v;
        }
        if let Some(v) = update.receipts {
            next.receipts = v;
        }
        if let Some(v) = update.issues {
            next.issues = v;
        }
        if let Some(v) = update.minimum_stock {
            next.minimum_stock = v;
        }
        if let Some(v) = update.buffer_stock {
            next.buffer_stock = v;
        }

        let valuation = valuate(&next.movement())?;
        next.closing_stock = valuation.closing_stock;
        next.reorder_point = valuation.reorder_point;
        next.stock_value = valuation.stock_value;
        next.is_reorder = valuation.is_reorder;

        Ok(next)
    }

    pub fn movement(&self) -> StockMovement {
        StockMovement {
            opening_stock: self.opening_stock,
            receipts: self.receipts,
            issues: self.issues,
            minimum_stock: self.minimum_stock,
            buffer_stock: self.buffer_stock,
            price: self.price,
        }
    }

    pub fn status(&self) -> StockStatus {
        if self.qty_in_stock() == 0 {
            StockStatus::OutOfStock
        } else if self.is_reorder {
            StockStatus::Reorder
        } else {
            StockStatus::InStock
        }
    }

    /// Stamp the persisted version (stores only).
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn opening_stock(&self) -> u32 {
        self.opening_stock
    }

    pub fn receipts(&self) -> u32 {
        self.receipts
    }

    pub fn issues(&self) -> u32 {
        self.issues
    }

    pub fn closing_stock(&self) -> u32 {
        self.closing_stock
    }

    /// Mirror of `closing_stock`.
    pub fn qty_in_stock(&self) -> u32 {
        self.closing_stock
    }

    pub fn minimum_stock(&self) -> u32 {
        self.minimum_stock
    }

    pub fn buffer_stock(&self) -> u32 {
        self.buffer_stock
    }

    pub fn reorder_point(&self) -> u32 {
        self.reorder_point
    }

    pub fn stock_value(&self) -> f64 {
        self.stock_value
    }

    pub fn is_reorder(&self) -> bool {
        self.is_reorder
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Entity for InventoryItem {
    type Id = InventoryItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TenantOwned for InventoryItem {
    fn company_id(&self) -> CompanyId {
        self.company_id
    }
}

impl Serialize for InventoryItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("InventoryItem", 16)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("company_id", &self.company_id)?;
        s.serialize_field("product_name", &self.product_name)?;
        s.serialize_field("description", &self.description)?;
        s.serialize_field("price", &self.price)?;
        s.serialize_field("opening_stock", &self.opening_stock)?;
        s.serialize_field("receipts", &self.receipts)?;
        s.serialize_field("issues", &self.issues)?;
        s.serialize_field("closing_stock", &self.closing_stock)?;
        s.serialize_field("qty_in_stock", &self.qty_in_stock())?;
        s.serialize_field("minimum_stock", &self.minimum_stock)?;
        s.serialize_field("buffer_stock", &self.buffer_stock)?;
        s.serialize_field("reorder_point", &self.reorder_point)?;
        s.serialize_field("stock_value", &self.stock_value)?;
        s.serialize_field("is_reorder", &self.is_reorder)?;
        s.serialize_field("version", &self.version)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stockroom_core::DomainError;

    fn widget() -> InventoryItem {
        InventoryItem::create_blank(
            InventoryItemId::new(),
            CompanyId::new(),
            NewItem {
                product_name: "Widget".to_string(),
                description: "A widget".to_string(),
                price: 2.0,
                minimum_stock: 5,
                buffer_stock: 3,
            },
        )
        .unwrap()
    }

    fn stock(opening: u32, receipts: u32, issues: u32) -> ItemUpdate {
        ItemUpdate {
            opening_stock: Some(opening),
            receipts: Some(receipts),
            issues: Some(issues),
            ..ItemUpdate::default()
        }
    }

    #[test]
    fn blank_item_starts_empty_and_flagged() {
        let item = widget();
        assert_eq!(item.opening_stock(), 0);
        assert_eq!(item.receipts(), 0);
        assert_eq!(item.issues(), 0);
        assert_eq!(item.closing_stock(), 0);
        assert_eq!(item.qty_in_stock(), 0);
        assert_eq!(item.stock_value(), 0.0);
        assert_eq!(item.reorder_point(), BOOTSTRAP_REORDER_POINT);
        assert!(item.is_reorder());
        assert_eq!(item.status(), StockStatus::OutOfStock);
    }

    #[test]
    fn blank_item_requires_a_name_and_valid_price() {
        let mut input = NewItem {
            product_name: " ".to_string(),
            description: String::new(),
            price: 1.0,
            minimum_stock: 0,
            buffer_stock: 0,
        };
        assert!(InventoryItem::create_blank(InventoryItemId::new(), CompanyId::new(), input.clone()).is_err());

        input.product_name = "Bolt".to_string();
        input.price = -1.0;
        assert!(InventoryItem::create_blank(InventoryItemId::new(), CompanyId::new(), input).is_err());
    }

    #[test]
    fn stock_update_recomputes_everything() {
        let item = widget().apply_update(&stock(20, 5, 10)).unwrap();
        assert_eq!(item.closing_stock(), 15);
        assert_eq!(item.qty_in_stock(), 15);
        assert_eq!(item.reorder_point(), 8);
        assert_eq!(item.stock_value(), 30.0);
        assert!(!item.is_reorder());
        assert_eq!(item.status(), StockStatus::InStock);
    }

    #[test]
    fn zeroing_stock_clears_the_reorder_flag() {
        let item = widget()
            .apply_update(&stock(20, 5, 10))
            .unwrap()
            .apply_update(&stock(0, 0, 0))
            .unwrap();
        assert_eq!(item.closing_stock(), 0);
        assert!(!item.is_reorder());
        assert_eq!(item.status(), StockStatus::OutOfStock);
    }

    #[test]
    fn price_only_update_revalues_existing_stock() {
        let item = widget().apply_update(&stock(20, 5, 10)).unwrap();
        let repriced = item
            .apply_update(&ItemUpdate {
                price: Some(3.5),
                ..ItemUpdate::default()
            })
            .unwrap();
        assert_eq!(repriced.closing_stock(), 15);
        assert_eq!(repriced.stock_value(), 52.5);
    }

    #[test]
    fn explicit_zero_price_is_applied() {
        let item = widget().apply_update(&stock(20, 5, 10)).unwrap();
        let free = item
            .apply_update(&ItemUpdate {
                price: Some(0.0),
                ..ItemUpdate::default()
            })
            .unwrap();
        assert_eq!(free.price(), 0.0);
        assert_eq!(free.stock_value(), 0.0);
    }

    #[test]
    fn threshold_update_alone_recomputes_reorder_flag() {
        let item = widget().apply_update(&stock(10, 0, 0)).unwrap();
        assert!(!item.is_reorder());

        let raised = item
            .apply_update(&ItemUpdate {
                minimum_stock: Some(12),
                ..ItemUpdate::default()
            })
            .unwrap();
        assert_eq!(raised.reorder_point(), 15);
        assert!(raised.is_reorder());
        assert_eq!(raised.status(), StockStatus::Reorder);
    }

    #[test]
    fn empty_update_still_applies_the_regular_rules() {
        let item = widget().apply_update(&ItemUpdate::default()).unwrap();
        assert_eq!(item.reorder_point(), 8);
        assert!(!item.is_reorder());
    }

    #[test]
    fn rejected_update_leaves_item_unchanged() {
        let item = widget().apply_update(&stock(5, 0, 0)).unwrap();
        let before = item.clone();
        let err = item.apply_update(&stock(5, 0, 6)).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(item, before);
    }

    #[test]
    fn absent_fields_deserialize_as_untouched() {
        let update: ItemUpdate = serde_json::from_str(r#"{ "price": 0, "receipts": 4 }"#).unwrap();
        assert_eq!(update.price, Some(0.0));
        assert_eq!(update.receipts, Some(4));
        assert_eq!(update.issues, None);
        assert_eq!(update.product_name, None);
    }

    #[test]
    fn serialized_item_exposes_qty_in_stock() {
        let item = widget().apply_update(&stock(3, 0, 1)).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["qty_in_stock"], 2);
        assert_eq!(json["closing_stock"], 2);
        assert_eq!(json["is_reorder"], true);
    }

    fn update_strategy() -> impl Strategy<Value = ItemUpdate> {
        (
            proptest::option::of(0u32..1_000),
            proptest::option::of(0u32..1_000),
            proptest::option::of(0u32..1_000),
            proptest::option::of(0u32..50),
            proptest::option::of(0u32..50),
            proptest::option::of(0u32..10_000),
        )
            .prop_map(|(opening, receipts, issues, minimum, buffer, cents)| ItemUpdate {
                opening_stock: opening,
                receipts,
                issues,
                minimum_stock: minimum,
                buffer_stock: buffer,
                price: cents.map(|c| f64::from(c) / 100.0),
                ..ItemUpdate::default()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after any sequence of accepted updates, every derived
        /// figure matches its definition over the current raw fields.
        #[test]
        fn derived_figures_hold_after_every_update(
            updates in prop::collection::vec(update_strategy(), 1..12)
        ) {
            let mut item = widget();
            for update in &updates {
                match item.apply_update(update) {
                    Ok(next) => item = next,
                    Err(DomainError::InvariantViolation(_)) => {
                        prop_assert!(
                            u64::from(update.issues.unwrap_or(item.issues()))
                                > u64::from(update.opening_stock.unwrap_or(item.opening_stock()))
                                    + u64::from(update.receipts.unwrap_or(item.receipts()))
                        );
                        continue;
                    }
                    Err(other) => return Err(TestCaseError::fail(format!("unexpected error: {other:?}"))),
                }

                prop_assert_eq!(
                    u64::from(item.closing_stock()),
                    u64::from(item.opening_stock()) + u64::from(item.receipts()) - u64::from(item.issues())
                );
                prop_assert_eq!(item.qty_in_stock(), item.closing_stock());
                prop_assert_eq!(item.reorder_point(), item.minimum_stock() + item.buffer_stock());
                prop_assert_eq!(item.stock_value(), f64::from(item.closing_stock()) * item.price());
                prop_assert_eq!(
                    item.is_reorder(),
                    item.qty_in_stock() > 0 && item.qty_in_stock() < item.reorder_point()
                );
            }
        }
    }
}
