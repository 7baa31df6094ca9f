// storefront/src/cart/inflight.rs

//! Deduplication of concurrent by-id catalog lookups.
//!
//! While a lookup for a product id is pending, later callers for the same id
//! await the pending lookup instead of issuing another request. Entries are
//! dropped as soon as the lookup settles, so a failure is never cached.

use crate::catalog::Catalog;
use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{Product, ProductId};
use futures_util::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, instrument, Level};

type LookupFuture = Shared<BoxFuture<'static, Result<Product, Arc<StorefrontError>>>>;

#[derive(Default)]
pub struct InFlightLookups {
  pending: Mutex<HashMap<ProductId, LookupFuture>>,
}

impl InFlightLookups {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of lookups currently awaiting the catalog.
  pub fn pending(&self) -> usize {
    self.pending.lock().len()
  }

  /// Resolves `id` through `catalog`, joining a pending lookup for the same id if any.
  #[instrument(name = "InFlightLookups::resolve", skip(self, catalog), fields(product_id = %id), err(Display))]
  pub async fn resolve(&self, id: ProductId, catalog: &Arc<dyn Catalog>) -> StorefrontResult<Product> {
    let lookup = {
      let mut pending = self.pending.lock();
      match pending.get(&id) {
        Some(existing) => {
          event!(Level::DEBUG, "Joining pending catalog lookup.");
          existing.clone()
        }
        None => {
          event!(Level::DEBUG, "Starting catalog lookup.");
          let catalog = Arc::clone(catalog);
          let lookup = async move { catalog.get_product(id).await.map_err(Arc::new) }
            .boxed()
            .shared();
          pending.insert(id, lookup.clone());
          lookup
        }
      }
    };

    let result = lookup.clone().await;

    {
      let mut pending = self.pending.lock();
      if pending.get(&id).is_some_and(|current| current.ptr_eq(&lookup)) {
        pending.remove(&id);
      }
    }

    result.map_err(|source| StorefrontError::Lookup { product_id: id, source })
  }
}
