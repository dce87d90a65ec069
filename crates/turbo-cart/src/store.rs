//! The cart store: in-memory cart state mirrored to persistent storage.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};
use turbo_cache::{Cache, FileStore};
use turbo_commerce::{AmountChange, Cart, CartError, LineItem, ProductId};
use turbo_data::{CatalogService, FetchClient, HttpStorefrontApi, StockService};

use crate::config::{CartConfig, DEFAULT_STORAGE_KEY};
use crate::error::ConfigError;
use crate::notify::{Notifier, TracingNotifier};

/// Shopping cart state with stock-validated mutations.
///
/// Every successful mutation overwrites the snapshot in the [`Cache`] before
/// the in-memory state changes, so memory never runs ahead of storage. Failed
/// operations leave both untouched and are reported to the [`Notifier`].
///
/// Mutations are serialized: an operation holds the cart from its first read
/// until its commit, service calls included. Clones share the same state.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

struct Inner {
    cart: Mutex<Cart>,
    updates: watch::Sender<Vec<LineItem>>,
    cache: Cache,
    key: String,
    catalog: Arc<dyn CatalogService>,
    stock: Arc<dyn StockService>,
    notifier: Arc<dyn Notifier>,
}

/// Builder for [`CartStore`].
pub struct CartStoreBuilder {
    catalog: Arc<dyn CatalogService>,
    stock: Arc<dyn StockService>,
    cache: Cache,
    key: String,
    notifier: Arc<dyn Notifier>,
}

impl CartStoreBuilder {
    /// Set the storage key (default `@RocketShoes:cart`).
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the notification sink (default [`TracingNotifier`]).
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Read the stored snapshot and build the store.
    ///
    /// A missing snapshot yields an empty cart. So does an unreadable one;
    /// the cart never refuses to start over bad storage.
    pub fn load(self) -> CartStore {
        let cart = read_snapshot(&self.cache, &self.key);
        info!(key = %self.key, items = cart.len(), "cart loaded");

        let (updates, _) = watch::channel(cart.items().to_vec());
        CartStore {
            inner: Arc::new(Inner {
                cart: Mutex::new(cart),
                updates,
                cache: self.cache,
                key: self.key,
                catalog: self.catalog,
                stock: self.stock,
                notifier: self.notifier,
            }),
        }
    }
}

fn read_snapshot(cache: &Cache, key: &str) -> Cart {
    match cache.get::<Vec<LineItem>>(key) {
        Ok(Some(items)) => {
            let stored = items.len();
            let cart = Cart::from_items(items);
            if cart.len() != stored {
                warn!(
                    key,
                    stored,
                    kept = cart.len(),
                    "dropped duplicate or empty line items from snapshot"
                );
            }
            cart
        }
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!(key, error = %e, "unreadable cart snapshot, starting empty");
            Cart::new()
        }
    }
}

impl CartStore {
    /// Start building a store over the given services and storage.
    pub fn builder(
        catalog: impl CatalogService + 'static,
        stock: impl StockService + 'static,
        cache: Cache,
    ) -> CartStoreBuilder {
        CartStoreBuilder {
            catalog: Arc::new(catalog),
            stock: Arc::new(stock),
            cache,
            key: DEFAULT_STORAGE_KEY.to_string(),
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Wire a store against the HTTP storefront API and a file-backed
    /// snapshot, as described by `config`.
    pub fn from_config(config: &CartConfig) -> Result<Self, ConfigError> {
        let mut client = FetchClient::new(config.api.base_url.clone())?;
        if let Some(policy) = config.api.fetch_policy() {
            client = client.with_default_policy(policy)?;
        }
        let api = Arc::new(HttpStorefrontApi::new(client));
        let cache = Cache::new(FileStore::open(&config.storage.dir)?);

        Ok(Self::builder(api.clone(), api, cache)
            .storage_key(config.storage.key.clone())
            .load())
    }

    /// Current line items, in display order.
    pub fn cart(&self) -> Vec<LineItem> {
        self.inner.updates.borrow().clone()
    }

    /// Watch the line items; the receiver sees every committed mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<LineItem>> {
        self.inner.updates.subscribe()
    }

    /// Storage key the snapshot lives under.
    pub fn storage_key(&self) -> &str {
        &self.inner.key
    }

    /// Add one unit of a product.
    ///
    /// Looks the product up in the catalog, checks stock, then either
    /// increments the existing line item or appends a new one with amount 1.
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_add_product(product_id).await;
        self.report("add_product", product_id, result)
    }

    /// Remove a product's line item entirely.
    pub async fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_remove_product(product_id).await;
        self.report("remove_product", product_id, result)
    }

    /// Set a product's amount to exactly `amount`.
    ///
    /// Amounts below 1 are a silent no-op: `Ok(())`, nothing stored, nobody
    /// notified.
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        let result = self.try_update_product_amount(product_id, amount).await;
        self.report("update_product_amount", product_id, result)
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let mut cart = self.inner.cart.lock().await;

        let mut product = self.inner.catalog.product(product_id).await.map_err(|e| {
            warn!(product_id = %product_id, error = %e, "catalog lookup failed");
            CartError::AddFailed
        })?;
        if product.id != product_id {
            warn!(product_id = %product_id, returned = %product.id, "catalog returned a different id");
            product.id = product_id;
        }

        let stock = self.inner.stock.stock(product_id).await.map_err(|e| {
            warn!(product_id = %product_id, error = %e, "stock lookup failed");
            CartError::OutOfStock
        })?;

        let mut next = cart.clone();
        next.add_one(product, &stock)?;
        self.commit(&mut cart, next, CartError::AddFailed)
    }

    async fn try_remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let mut cart = self.inner.cart.lock().await;

        let mut next = cart.clone();
        next.remove(product_id)?;
        self.commit(&mut cart, next, CartError::RemoveFailed)
    }

    async fn try_update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        let mut cart = self.inner.cart.lock().await;

        if !cart.contains(product_id) {
            return Err(CartError::UpdateFailed);
        }

        let stock = self.inner.stock.stock(product_id).await.map_err(|e| {
            warn!(product_id = %product_id, error = %e, "stock lookup failed");
            CartError::UpdateFailed
        })?;

        let mut next = cart.clone();
        match next.set_amount(product_id, amount, &stock)? {
            AmountChange::Updated => self.commit(&mut cart, next, CartError::UpdateFailed),
            AmountChange::Ignored => {
                debug!(product_id = %product_id, amount, "amount below 1 ignored");
                Ok(())
            }
        }
    }

    /// Persist `next`, then make it the current state.
    fn commit(&self, cart: &mut Cart, next: Cart, on_failure: CartError) -> Result<(), CartError> {
        self.inner.cache.set(&self.inner.key, &next).map_err(|e| {
            error!(key = %self.inner.key, error = %e, "failed to persist cart");
            on_failure
        })?;

        *cart = next;
        self.inner.updates.send_replace(cart.items().to_vec());
        Ok(())
    }

    fn report(
        &self,
        operation: &'static str,
        product_id: ProductId,
        result: Result<(), CartError>,
    ) -> Result<(), CartError> {
        match &result {
            Ok(()) => debug!(operation, product_id = %product_id, "cart updated"),
            Err(e) => {
                info!(operation, product_id = %product_id, kind = e.kind().as_str(), "cart operation failed");
                self.inner.notifier.notify_error(e);
            }
        }
        result
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.inner.key)
            .field("items", &self.inner.updates.borrow().len())
            .finish_non_exhaustive()
    }
}
