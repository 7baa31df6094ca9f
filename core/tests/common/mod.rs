// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use storefront::{Catalog, CategoryFilter, MemoryCatalog, Product, ProductId, Storefront, StorefrontResult};
use tracing::Level;

// --- Fixture products (shape of the fakestoreapi catalog) ---

pub fn backpack() -> Product {
  Product::new(1, "Fjallraven - Foldsack No. 1 Backpack", Decimal::new(999, 2))
    .with_category("men's clothing")
    .with_rating(3.9, 120)
    .with_description("Your perfect pack for everyday use and walks in the forest.")
    .with_image("https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg")
}

pub fn tshirt() -> Product {
  Product::new(2, "Mens Casual Premium Slim Fit T-Shirts", Decimal::new(2230, 2))
    .with_category("men's clothing")
    .with_rating(4.1, 259)
}

pub fn bracelet() -> Product {
  Product::new(5, "Legends Naga Gold & Silver Dragon Station Chain Bracelet", Decimal::new(695, 0))
    .with_category("jewelery")
    .with_rating(4.6, 400)
}

pub fn hard_drive() -> Product {
  Product::new(9, "WD 2TB Elements Portable External Hard Drive", Decimal::new(64, 0))
    .with_category("electronics")
    .with_rating(3.3, 203)
}

pub fn fixture_products() -> Vec<Product> {
  vec![backpack(), tshirt(), bracelet(), hard_drive()]
}

pub fn memory_catalog() -> Arc<MemoryCatalog> {
  Arc::new(MemoryCatalog::new(fixture_products()))
}

pub fn storefront_over(catalog: Arc<dyn Catalog>) -> Storefront {
  Storefront::new(catalog)
}

// --- A catalog whose by-id lookups take a while ---

/// Wraps a `MemoryCatalog` and delays `get_product`, so concurrent adds
/// overlap while a lookup is pending.
pub struct SlowCatalog {
  pub inner: Arc<MemoryCatalog>,
  pub delay: Duration,
}

impl SlowCatalog {
  pub fn new(inner: Arc<MemoryCatalog>, delay_ms: u64) -> Self {
    Self {
      inner,
      delay: Duration::from_millis(delay_ms),
    }
  }
}

#[async_trait]
impl Catalog for SlowCatalog {
  async fn list_categories(&self) -> StorefrontResult<Vec<String>> {
    self.inner.list_categories().await
  }

  async fn list_products(&self, filter: &CategoryFilter) -> StorefrontResult<Vec<Product>> {
    self.inner.list_products(filter).await
  }

  async fn list_trending(&self, limit: usize) -> StorefrontResult<Vec<Product>> {
    self.inner.list_trending(limit).await
  }

  async fn get_product(&self, id: ProductId) -> StorefrontResult<Product> {
    tokio::time::sleep(self.delay).await;
    self.inner.get_product(id).await
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// Checks the invariants every cart must hold after any sequence of mutations.
pub fn assert_cart_invariants(shop: &Storefront) {
  let cart = shop.cart();
  let mut seen = std::collections::HashSet::new();
  for line in cart.lines() {
    assert!(seen.insert(line.id()), "duplicate line for product {}", line.id());
    assert!(line.quantity >= 1, "line {} left at quantity 0", line.id());
  }
  let expected_count: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
  assert_eq!(shop.total_count(), expected_count);
  assert_eq!(shop.total_count() == 0, cart.is_empty());
}
