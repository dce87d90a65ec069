//! Cart and line item types.

use crate::catalog::{Product, Stock};
use crate::error::CartError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Snapshot field holding a line item's quantity.
const AMOUNT_FIELD: &str = "amount";

/// A shopping cart.
///
/// Serializes as a bare JSON array of line items, which is exactly the
/// snapshot written to persistent storage. Insertion order is display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

/// Outcome of [`Cart::set_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountChange {
    /// The line item now holds the requested amount.
    Updated,
    /// Requested amount was below 1; nothing changed.
    Ignored,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from previously stored items.
    ///
    /// Enforces the cart invariants: the first item for an ID wins and items
    /// with a zero amount are dropped.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| item.amount >= 1 && seen.insert(item.id()))
            .collect();
        Self { items }
    }

    /// Add one unit of `product`, as long as `stock` covers it.
    ///
    /// An existing line item is incremented; otherwise a new item with
    /// amount 1 is appended.
    pub fn add_one(&mut self, product: Product, stock: &Stock) -> Result<(), CartError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id() == product.id) {
            if stock.amount <= existing.amount {
                return Err(CartError::OutOfStock);
            }
            existing.amount += 1;
            return Ok(());
        }

        if !stock.can_fulfill(1) {
            return Err(CartError::OutOfStock);
        }
        self.items.push(LineItem::new(product, 1));
        Ok(())
    }

    /// Remove the line item for `id`.
    pub fn remove(&mut self, id: ProductId) -> Result<LineItem, CartError> {
        let index = self
            .items
            .iter()
            .position(|i| i.id() == id)
            .ok_or(CartError::RemoveFailed)?;
        Ok(self.items.remove(index))
    }

    /// Set the amount of the line item for `id` to exactly `amount`.
    ///
    /// Amounts below 1 are ignored rather than rejected.
    pub fn set_amount(
        &mut self,
        id: ProductId,
        amount: i64,
        stock: &Stock,
    ) -> Result<AmountChange, CartError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id() == id)
            .ok_or(CartError::UpdateFailed)?;

        if amount < 1 {
            return Ok(AmountChange::Ignored);
        }

        match u32::try_from(amount) {
            Ok(amount) if stock.can_fulfill(amount) => {
                item.amount = amount;
                Ok(AmountChange::Updated)
            }
            _ => Err(CartError::OutOfStock),
        }
    }

    /// Get the line items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get the line item for a product.
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Get number of unique items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get total unit count (sum of amounts).
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.amount)).sum()
    }
}

/// A line item in the cart: the catalog record plus the quantity held.
///
/// The cart's `amount` always wins over an `amount` the catalog record may
/// carry. It is stripped from `product.extra` on construction, and when a
/// snapshot repeats the key the last occurrence is read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Map<String, Value>")]
pub struct LineItem {
    /// Catalog data, flattened next to `amount` in the snapshot.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity, always at least 1 while in a cart.
    pub amount: u32,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(mut product: Product, amount: u32) -> Self {
        product.extra.remove(AMOUNT_FIELD);
        Self { product, amount }
    }

    /// Product ID of this line item.
    pub fn id(&self) -> ProductId {
        self.product.id
    }
}

impl TryFrom<Map<String, Value>> for LineItem {
    type Error = serde_json::Error;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let amount = fields
            .remove(AMOUNT_FIELD)
            .ok_or_else(|| <serde_json::Error as serde::de::Error>::missing_field(AMOUNT_FIELD))?;
        let amount = serde_json::from_value(amount)?;
        let product = serde_json::from_value(Value::Object(fields))?;
        Ok(Self { product, amount })
    }
}
