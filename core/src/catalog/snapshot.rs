// storefront/src/catalog/snapshot.rs

use crate::models::{CategoryFilter, Product, ProductId};
use chrono::{DateTime, Utc};

/// The most recent product listing fetched for a session.
///
/// Replaced wholesale by each successful listing; never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
  pub filter: CategoryFilter,
  pub products: Vec<Product>,
  pub fetched_at: DateTime<Utc>,
}

impl ProductSnapshot {
  pub fn new(filter: CategoryFilter, products: Vec<Product>) -> Self {
    Self {
      filter,
      products,
      fetched_at: Utc::now(),
    }
  }

  pub fn find(&self, id: ProductId) -> Option<&Product> {
    self.products.iter().find(|product| product.id == id)
  }

  pub fn len(&self) -> usize {
    self.products.len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.is_empty()
  }
}
