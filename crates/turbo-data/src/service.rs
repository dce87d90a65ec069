//! Catalog and stock service seams, plus their HTTP implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use turbo_commerce::{Product, ProductId, Stock};

use crate::{DependencyTag, FetchClient, FetchError};

/// Read-only access to catalog records.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch the catalog record for a product.
    async fn product(&self, id: ProductId) -> Result<Product, FetchError>;
}

/// Read-only access to current stock levels.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Fetch the current stock reading for a product.
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError>;
}

#[async_trait]
impl<T: CatalogService + ?Sized> CatalogService for Arc<T> {
    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        (**self).product(id).await
    }
}

#[async_trait]
impl<T: StockService + ?Sized> StockService for Arc<T> {
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        (**self).stock(id).await
    }
}

/// Wire shape of `GET /stock/{id}`. The id is optional; some backends only
/// send the amount.
#[derive(Debug, Deserialize)]
struct StockRecord {
    #[serde(default)]
    id: Option<ProductId>,
    amount: i64,
}

/// Storefront REST API: `GET /products/{id}` and `GET /stock/{id}`.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    client: FetchClient,
}

impl HttpStorefrontApi {
    /// Create an API over a configured client.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// Underlying fetch client.
    pub fn client(&self) -> &FetchClient {
        &self.client
    }
}

#[async_trait]
impl CatalogService for HttpStorefrontApi {
    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        self.client
            .get_json(&format!("/products/{id}"), DependencyTag::Catalog)
            .await
    }
}

#[async_trait]
impl StockService for HttpStorefrontApi {
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        let record: StockRecord = self
            .client
            .get_json(&format!("/stock/{id}"), DependencyTag::Inventory)
            .await?;

        if let Some(reported) = record.id.filter(|reported| *reported != id) {
            tracing::warn!(product_id = %id, reported = %reported, "stock record id mismatch");
        }

        // Negative readings mean nothing is available.
        let amount = u32::try_from(record.amount.max(0)).unwrap_or(u32::MAX);
        Ok(Stock::new(id, amount))
    }
}
