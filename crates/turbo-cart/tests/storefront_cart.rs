//! End-to-end cart tests.
//!
//! Starts an axum stub of the storefront API, wires a `CartStore` from
//! config against it, and checks the file-backed snapshot.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use turbo_cache::{Cache, FileStore};
use turbo_cart::{CartConfig, CartError, CartStore, RecordingNotifier, DEFAULT_STORAGE_KEY};
use turbo_commerce::{LineItem, ProductId};

type Stock = Arc<Mutex<HashMap<u64, i64>>>;

async fn product(
    State(stock): State<Stock>,
    UrlPath(id): UrlPath<u64>,
) -> Result<Json<Value>, StatusCode> {
    if !stock.lock().unwrap().contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "id": id,
        "title": format!("Tênis {id}"),
        "price": 139.9,
        "image": format!("https://rocketshoes.test/{id}.jpg"),
        "color": "azul"
    })))
}

async fn stock(
    State(stock): State<Stock>,
    UrlPath(id): UrlPath<u64>,
) -> Result<Json<Value>, StatusCode> {
    let amount = stock.lock().unwrap().get(&id).copied();
    amount
        .map(|amount| Json(json!({ "id": id, "amount": amount })))
        .ok_or(StatusCode::NOT_FOUND)
}

/// Bind to port 0 and return the base URL plus a handle on the stock levels.
async fn start_storefront(levels: &[(u64, i64)]) -> (String, Stock) {
    let stock_levels: Stock = Arc::new(Mutex::new(levels.iter().copied().collect()));
    let app = Router::new()
        .route("/products/:id", get(product))
        .route("/stock/:id", get(stock))
        .with_state(stock_levels.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), stock_levels)
}

fn config_for(base_url: &str, dir: &Path) -> CartConfig {
    let mut config = CartConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.max_retries = Some(0);
    config.storage.dir = dir.to_path_buf();
    config
}

fn stored(dir: &Path) -> anyhow::Result<Option<Vec<LineItem>>> {
    Ok(Cache::new(FileStore::open(dir)?).get(DEFAULT_STORAGE_KEY)?)
}

#[tokio::test]
async fn test_shopping_session_survives_restart() -> anyhow::Result<()> {
    let (base, _) = start_storefront(&[(1, 3), (2, 5)]).await;
    let dir = tempfile::tempdir()?;
    let config = config_for(&base, dir.path());

    let store = CartStore::from_config(&config)?;
    store.add_product(ProductId::new(1)).await?;
    store.add_product(ProductId::new(2)).await?;
    store.add_product(ProductId::new(1)).await?;
    store.update_product_amount(ProductId::new(2), 4).await?;

    let cart = store.cart();
    assert_eq!(cart.len(), 2);
    assert_eq!((cart[0].id(), cart[0].amount), (ProductId::new(1), 2));
    assert_eq!((cart[1].id(), cart[1].amount), (ProductId::new(2), 4));
    assert_eq!(cart[0].product.extra.get("color"), Some(&json!("azul")));

    drop(store);
    let reopened = CartStore::from_config(&config)?;
    assert_eq!(reopened.cart(), cart);
    assert_eq!(stored(dir.path())?, Some(cart));
    Ok(())
}

#[tokio::test]
async fn test_snapshot_is_a_plain_json_array() -> anyhow::Result<()> {
    let (base, _) = start_storefront(&[(7, 3)]).await;
    let dir = tempfile::tempdir()?;

    let store = CartStore::from_config(&config_for(&base, dir.path()))?;
    store.add_product(ProductId::new(7)).await?;

    let raw: Option<Value> = Cache::new(FileStore::open(dir.path())?).get(DEFAULT_STORAGE_KEY)?;
    assert_eq!(
        raw,
        Some(json!([{
            "id": 7,
            "title": "Tênis 7",
            "price": 139.9,
            "image": "https://rocketshoes.test/7.jpg",
            "color": "azul",
            "amount": 1
        }]))
    );
    Ok(())
}

#[tokio::test]
async fn test_stock_changes_between_operations_are_honored() -> anyhow::Result<()> {
    let (base, levels) = start_storefront(&[(7, 2)]).await;
    let dir = tempfile::tempdir()?;

    let store = CartStore::from_config(&config_for(&base, dir.path()))?;
    store.add_product(ProductId::new(7)).await?;

    levels.lock().unwrap().insert(7, 1);
    let err = store.update_product_amount(ProductId::new(7), 2).await.unwrap_err();
    assert_eq!(err, CartError::OutOfStock);

    levels.lock().unwrap().insert(7, -1);
    let err = store.add_product(ProductId::new(7)).await.unwrap_err();
    assert_eq!(err, CartError::OutOfStock);

    assert_eq!(store.cart()[0].amount, 1);
    assert_eq!(stored(dir.path())?.map(|items| items[0].amount), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_unknown_product_is_not_added() -> anyhow::Result<()> {
    let (base, _) = start_storefront(&[]).await;
    let dir = tempfile::tempdir()?;
    let notifier = RecordingNotifier::new();

    let api_config = config_for(&base, dir.path());
    let client = turbo_data::FetchClient::new(api_config.api.base_url.clone())?;
    let api = Arc::new(turbo_data::HttpStorefrontApi::new(client));
    let store = CartStore::builder(api.clone(), api, Cache::new(FileStore::open(dir.path())?))
        .notifier(notifier.clone())
        .load();

    let err = store.add_product(ProductId::new(404)).await.unwrap_err();

    assert_eq!(err, CartError::AddFailed);
    assert_eq!(notifier.messages(), vec!["Erro na adição do produto"]);
    assert!(stored(dir.path())?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_snapshot_starts_empty() -> anyhow::Result<()> {
    let (base, _) = start_storefront(&[(7, 3)]).await;
    let dir = tempfile::tempdir()?;
    let config = config_for(&base, dir.path());

    let cache = Cache::new(FileStore::open(dir.path())?);
    cache.set(DEFAULT_STORAGE_KEY, &json!({ "not": "a cart" }))?;

    let store = CartStore::from_config(&config)?;
    assert!(store.cart().is_empty());

    store.add_product(ProductId::new(7)).await?;
    assert_eq!(stored(dir.path())?.map(|items| items.len()), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_handlers_do_not_lose_updates() -> anyhow::Result<()> {
    let (base, _) = start_storefront(&[(7, 10)]).await;
    let dir = tempfile::tempdir()?;
    let store = CartStore::from_config(&config_for(&base, dir.path()))?;

    let results = futures::future::join_all(
        (0..10).map(|_| store.add_product(ProductId::new(7))),
    )
    .await;
    assert!(results.iter().all(Result::is_ok));

    assert_eq!(store.cart()[0].amount, 10);
    assert_eq!(stored(dir.path())?.map(|items| items[0].amount), Some(10));
    Ok(())
}
