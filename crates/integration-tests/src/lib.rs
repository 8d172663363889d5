//! Integration tests for Go Marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_session` - Cart state across simulated app restarts on a real
//!   file-backed store
//! - `summary_view` - The floating summary wired through the composition root

use std::path::Path;
use std::sync::Arc;

use go_marketplace_cart::storage::{FileStore, KeyValueStore};
use go_marketplace_cart::store::{CartStore, DEFAULT_STORAGE_KEY};
use go_marketplace_core::{CurrencyCode, ProductId, ProductPreview};
use rust_decimal::Decimal;

/// A fresh cart store over a file store in `dir`, as an app launch would
/// create it.
#[must_use]
pub fn launch(dir: &Path) -> CartStore {
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir));
    CartStore::new(storage, DEFAULT_STORAGE_KEY, CurrencyCode::BRL)
}

/// A catalogue product with a price given in cents.
///
/// # Panics
///
/// Panics if `id` is empty or `cents` is negative.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn product(id: &str, cents: i64) -> ProductPreview {
    ProductPreview::new(
        ProductId::parse(id).unwrap(),
        format!("Product {id}"),
        format!("https://cdn.example.com/{id}.png"),
        Decimal::new(cents, 2),
    )
    .unwrap()
}

/// Parse a product ID.
///
/// # Panics
///
/// Panics if `id` is empty.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn id(id: &str) -> ProductId {
    ProductId::parse(id).unwrap()
}
