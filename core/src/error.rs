// storefront/src/error.rs
use crate::models::ProductId;
use anyhow::Error as AnyhowError;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
  /// The request never produced a response (DNS, connect, timeout, reset).
  #[error("Catalog request to '{url}' failed. Source: {source}")]
  Network {
    url: String,
    #[source]
    source: AnyhowError,
  },

  /// The catalog answered, but not with a 2xx status.
  #[error("Catalog request to '{url}' returned HTTP {status}")]
  Status { url: String, status: u16 },

  /// The body could not be decoded into the expected shape.
  #[error("Malformed catalog response from '{url}'. Source: {source}")]
  MalformedResponse {
    url: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Product {product_id} not found in catalog")]
  ProductNotFound { product_id: ProductId },

  /// A lookup shared between concurrent `add_item` calls failed.
  /// Every waiter receives the same underlying error.
  #[error("Lookup of product {product_id} failed: {source}")]
  Lookup {
    product_id: ProductId,
    #[source]
    source: Arc<StorefrontError>,
  },

  #[error("Configuration error: {0}")]
  Config(String),
}

impl StorefrontError {
  /// True for failures that came from talking to the catalog, as opposed to
  /// local configuration or bookkeeping errors.
  pub fn is_catalog_failure(&self) -> bool {
    match self {
      StorefrontError::Network { .. }
      | StorefrontError::Status { .. }
      | StorefrontError::MalformedResponse { .. } => true,
      StorefrontError::Lookup { source, .. } => source.is_catalog_failure(),
      _ => false,
    }
  }

  /// True when the catalog reported that the product does not exist.
  pub fn is_not_found(&self) -> bool {
    match self {
      StorefrontError::ProductNotFound { .. } => true,
      StorefrontError::Status { status, .. } => *status == 404,
      StorefrontError::Lookup { source, .. } => source.is_not_found(),
      _ => false,
    }
  }
}

pub type StorefrontResult<T, E = StorefrontError> = std::result::Result<T, E>;
