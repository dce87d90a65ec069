//! Shopping cart module.
//!
//! Contains the cart, its line items and the stock rules for mutating them.

mod cart;

pub use cart::{AmountChange, Cart, LineItem};
