//! Stock valuation arithmetic.
//!
//! Every derived figure on an inventory item is a pure function of its raw
//! stock-movement inputs:
//!
//! ```text
//! closing_stock = opening_stock + receipts - issues
//! qty_in_stock  = closing_stock
//! reorder_point = minimum_stock + buffer_stock
//! stock_value   = closing_stock * price
//! is_reorder    = 0 < qty_in_stock < reorder_point
//! ```
//!
//! An empty shelf (`qty_in_stock == 0`) is "out of stock", which is a
//! different state from "needs reordering".

use stockroom_core::{DomainError, DomainResult};

/// Raw inputs to a valuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockMovement {
    pub opening_stock: u32,
    pub receipts: u32,
    pub issues: u32,
    pub minimum_stock: u32,
    pub buffer_stock: u32,
    pub price: f64,
}

/// Derived figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Valuation {
    pub closing_stock: u32,
    pub reorder_point: u32,
    pub stock_value: f64,
    pub is_reorder: bool,
}

/// Recompute the derived figures for a set of movements.
///
/// Stock counts never go negative: issuing more than is available is an
/// invariant violation, as is overflowing the counter type.
pub fn valuate(movement: &StockMovement) -> DomainResult<Valuation> {
    let available = u64::from(movement.opening_stock) + u64::from(movement.receipts);
    let issues = u64::from(movement.issues);
    if issues > available {
        return Err(DomainError::invariant(format!(
            "issues ({issues}) exceed opening stock plus receipts ({available})"
        )));
    }

    let closing_stock = u32::try_from(available - issues)
        .map_err(|_| DomainError::invariant("closing stock overflows the stock counter"))?;

    let reorder_point = movement
        .minimum_stock
        .checked_add(movement.buffer_stock)
        .ok_or_else(|| DomainError::invariant("reorder point overflows the stock counter"))?;

    Ok(Valuation {
        closing_stock,
        reorder_point,
        stock_value: f64::from(closing_stock) * movement.price,
        is_reorder: closing_stock > 0 && closing_stock < reorder_point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movement(opening: u32, receipts: u32, issues: u32) -> StockMovement {
        StockMovement {
            opening_stock: opening,
            receipts,
            issues,
            minimum_stock: 5,
            buffer_stock: 3,
            price: 2.0,
        }
    }

    #[test]
    fn healthy_stock_is_not_flagged() {
        let v = valuate(&movement(20, 5, 10)).unwrap();
        assert_eq!(v.closing_stock, 15);
        assert_eq!(v.reorder_point, 8);
        assert_eq!(v.stock_value, 30.0);
        assert!(!v.is_reorder);
    }

    #[test]
    fn low_stock_is_flagged_for_reorder() {
        let v = valuate(&movement(4, 3, 0)).unwrap();
        assert_eq!(v.closing_stock, 7);
        assert!(v.is_reorder);
    }

    #[test]
    fn stock_at_reorder_point_is_not_flagged() {
        let v = valuate(&movement(8, 0, 0)).unwrap();
        assert_eq!(v.closing_stock, 8);
        assert!(!v.is_reorder);
    }

    #[test]
    fn empty_shelf_is_out_of_stock_not_reorder() {
        let v = valuate(&movement(0, 0, 0)).unwrap();
        assert_eq!(v.closing_stock, 0);
        assert_eq!(v.stock_value, 0.0);
        assert!(!v.is_reorder);

        let v = valuate(&movement(10, 5, 15)).unwrap();
        assert_eq!(v.closing_stock, 0);
        assert!(!v.is_reorder);
    }

    #[test]
    fn over_issuing_is_rejected() {
        let err = valuate(&movement(3, 1, 5)).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn counter_overflow_is_rejected() {
        let err = valuate(&movement(u32::MAX, 1, 0)).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));

        let mut m = movement(0, 0, 0);
        m.minimum_stock = u32::MAX;
        assert!(valuate(&m).is_err());
    }
}
