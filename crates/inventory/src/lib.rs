//! Inventory domain module.
//!
//! This crate contains the stock valuation rules for inventory items,
//! implemented purely as deterministic domain logic (no IO, no auth, no storage).

pub mod item;
pub mod valuation;

pub use item::{BOOTSTRAP_REORDER_POINT, InventoryItem, ItemUpdate, NewItem, StockStatus};
pub use valuation::{StockMovement, Valuation, valuate};
