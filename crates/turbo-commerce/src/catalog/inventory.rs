//! Stock snapshots.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Point-in-time availability for a product, as reported by the stock service.
///
/// Only used to validate a pending cart mutation; never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product the reading is for.
    pub id: ProductId,
    /// Units available.
    pub amount: u32,
}

impl Stock {
    /// Create a new stock reading.
    pub fn new(id: impl Into<ProductId>, amount: u32) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }

    /// Check if `quantity` units can be held in a cart.
    pub fn can_fulfill(&self, quantity: u32) -> bool {
        self.amount >= quantity
    }

    /// Check if out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.amount == 0
    }
}
