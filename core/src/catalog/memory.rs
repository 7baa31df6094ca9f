// storefront/src/catalog/memory.rs

use super::Catalog;
use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{CategoryFilter, Product, ProductId};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A `Catalog` backed by a fixed product list held in memory.
///
/// Counts by-id lookups, and can be switched into a failing mode where every
/// call returns a network error.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
  products: RwLock<Vec<Product>>,
  lookups: AtomicUsize,
  failing: AtomicBool,
}

impl MemoryCatalog {
  pub fn new(products: Vec<Product>) -> Self {
    Self {
      products: RwLock::new(products),
      ..Self::default()
    }
  }

  /// Number of `get_product` calls served so far.
  pub fn lookups(&self) -> usize {
    self.lookups.load(Ordering::SeqCst)
  }

  pub fn set_failing(&self, failing: bool) {
    self.failing.store(failing, Ordering::SeqCst);
  }

  /// Replaces a product with the same id, or appends it.
  pub fn upsert(&self, product: Product) {
    let mut products = self.products.write();
    match products.iter_mut().find(|p| p.id == product.id) {
      Some(existing) => *existing = product,
      None => products.push(product),
    }
  }

  fn check_available(&self, url: &str) -> StorefrontResult<()> {
    if self.failing.load(Ordering::SeqCst) {
      return Err(StorefrontError::Network {
        url: format!("memory://{}", url),
        source: anyhow::anyhow!("catalog unavailable"),
      });
    }
    Ok(())
  }
}

#[async_trait]
impl Catalog for MemoryCatalog {
  async fn list_categories(&self) -> StorefrontResult<Vec<String>> {
    self.check_available("products/categories")?;
    let mut categories: Vec<String> = Vec::new();
    for product in self.products.read().iter() {
      if !product.category.is_empty() && !categories.contains(&product.category) {
        categories.push(product.category.clone());
      }
    }
    Ok(categories)
  }

  async fn list_products(&self, filter: &CategoryFilter) -> StorefrontResult<Vec<Product>> {
    self.check_available("products")?;
    let products = self.products.read();
    Ok(match filter {
      CategoryFilter::All => products.clone(),
      CategoryFilter::Named(name) => products.iter().filter(|p| &p.category == name).cloned().collect(),
    })
  }

  async fn list_trending(&self, limit: usize) -> StorefrontResult<Vec<Product>> {
    self.check_available("products?limit")?;
    Ok(self.products.read().iter().take(limit).cloned().collect())
  }

  async fn get_product(&self, id: ProductId) -> StorefrontResult<Product> {
    self.lookups.fetch_add(1, Ordering::SeqCst);
    self.check_available(&format!("products/{}", id))?;
    self
      .products
      .read()
      .iter()
      .find(|p| p.id == id)
      .cloned()
      .ok_or(StorefrontError::ProductNotFound { product_id: id })
  }
}
