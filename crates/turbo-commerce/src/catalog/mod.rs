//! Product catalog module.
//!
//! Contains the catalog product record and stock snapshots.

mod inventory;
mod product;

pub use inventory::Stock;
pub use product::Product;
