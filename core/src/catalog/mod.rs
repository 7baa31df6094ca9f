// storefront/src/catalog/mod.rs

//! Access to the external product/category data source.
//!
//! The storefront only reads from the catalog. Every call may fail with a
//! network, status or malformed-response error; callers decide whether that
//! failure is shown, logged, or ignored. Nothing here retries.

pub mod http;
pub mod memory;
pub mod snapshot;

use crate::error::StorefrontResult;
use crate::models::{CategoryFilter, Product, ProductId};
use async_trait::async_trait;

pub use http::{HttpCatalog, DEFAULT_API_BASE};
pub use memory::MemoryCatalog;
pub use snapshot::ProductSnapshot;

/// Read-only catalog operations the storefront depends on.
#[async_trait]
pub trait Catalog: Send + Sync + 'static {
  async fn list_categories(&self) -> StorefrontResult<Vec<String>>;

  /// All products, or only those of one category.
  async fn list_products(&self, filter: &CategoryFilter) -> StorefrontResult<Vec<Product>>;

  /// The first `limit` products of the catalog.
  async fn list_trending(&self, limit: usize) -> StorefrontResult<Vec<Product>>;

  async fn get_product(&self, id: ProductId) -> StorefrontResult<Product>;
}
