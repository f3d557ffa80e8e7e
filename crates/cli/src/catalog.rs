//! Stocking the store: the built-in demo catalog or a JSON catalog file.
//!
//! A catalog file is a JSON array of products:
//!
//! ```json
//! [
//!   { "name": "MacBook Air M2", "price": 1450, "quantity": 100 },
//!   { "name": "Refurbished Kindle", "price": 60, "quantity": 0, "active": false }
//! ]
//! ```
//!
//! `active` defaults to `true`.

use std::fs;
use std::path::Path;

use anyhow::Context;
use storefront_core::DomainResult;
use storefront_products::{NewProduct, Product};
use storefront_store::Store;

/// Products the store starts with when no catalog file is given.
pub fn demo_catalog() -> Vec<NewProduct> {
    [
        ("MacBook Air M2", 1450.0, 100),
        ("Bose QuietComfort Earbuds", 250.0, 500),
        ("Google Pixel 7", 500.0, 250),
    ]
    .into_iter()
    .map(|(name, price, quantity)| NewProduct {
        name: name.to_string(),
        price,
        quantity,
        active: true,
    })
    .collect()
}

/// Parse catalog entries from a JSON file.
pub fn read_catalog(path: &Path) -> anyhow::Result<Vec<NewProduct>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let entries: Vec<NewProduct> = serde_json::from_str(&data)
        .with_context(|| format!("invalid JSON in catalog {}", path.display()))?;
    Ok(entries)
}

/// Validate every entry and build the store from them, in order.
pub fn build_store(entries: Vec<NewProduct>) -> DomainResult<Store> {
    let products = entries
        .into_iter()
        .map(Product::create)
        .collect::<DomainResult<Vec<_>>>()?;
    Store::new(products)
}

/// Stock a store from `path`, or from the demo catalog when `None`.
pub fn load_store(path: Option<&Path>) -> anyhow::Result<Store> {
    let entries = match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading catalog");
            read_catalog(path)?
        }
        None => demo_catalog(),
    };
    let store = build_store(entries).context("catalog rejected")?;
    Ok(store)
}
