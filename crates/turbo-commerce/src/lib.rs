//! Cart domain types and stock rules for TurboCart.
//!
//! This crate is pure and synchronous. It knows nothing about HTTP or
//! storage; the `turbo-cart` store feeds it catalog records and stock
//! readings and persists whatever it produces.
//!
//! - **Catalog**: Products and stock snapshots
//! - **Cart**: Ordered line items with add/remove/set-amount rules
//!
//! # Example
//!
//! ```rust
//! use turbo_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! let product = Product::new(7).with_title("Tênis de Caminhada");
//!
//! cart.add_one(product, &Stock::new(7, 3)).unwrap();
//! assert_eq!(cart.get(ProductId::new(7)).unwrap().amount, 1);
//!
//! // Out of stock: the cart is left untouched.
//! let err = cart.set_amount(ProductId::new(7), 4, &Stock::new(7, 3)).unwrap_err();
//! assert_eq!(err, CartError::OutOfStock);
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod cart;

pub use cart::{AmountChange, Cart, LineItem};
pub use catalog::{Product, Stock};
pub use error::{CartError, ErrorKind};
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CartError, ErrorKind};
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{Product, Stock};

    // Cart
    pub use crate::cart::{AmountChange, Cart, LineItem};
}
