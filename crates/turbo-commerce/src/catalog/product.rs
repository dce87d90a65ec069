//! Catalog product records.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product as returned by the storefront catalog.
///
/// Only `id` is required. Fields the cart doesn't interpret are kept in
/// `extra` and written back untouched, so a cart snapshot carries the full
/// catalog record the UI rendered from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Unit price as reported by the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Any other catalog fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Create a bare product with only an ID.
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            price: None,
            image: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the unit price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_minimal_record() {
        let product: Product = serde_json::from_value(json!({ "id": 3 })).unwrap();
        assert_eq!(product, Product::new(3));
    }

    #[test]
    fn test_product_keeps_unknown_fields() {
        let raw = json!({
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/shoe.jpg",
            "brand": "Rocket"
        });
        let product: Product = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(product.price, Some(179.9));
        assert_eq!(product.extra.get("brand"), Some(&json!("Rocket")));
        assert_eq!(serde_json::to_value(&product).unwrap(), raw);
    }
}
