// storefront/src/store/storefront.rs

//! The per-session store object: the cart, the last product listing, and the
//! product open in the detail view, plus the catalog they are resolved from.

use super::notice::{Notice, ADDED_TO_CART, MAX_PENDING_NOTICES, QUANTITY_UPDATED};
use crate::cart::{AddOutcome, Cart, InFlightLookups, QuantityChange, ResolvedFrom};
use crate::catalog::{Catalog, ProductSnapshot};
use crate::core::StateHandle;
use crate::error::StorefrontResult;
use crate::models::{CartLine, CategoryFilter, Product, ProductId};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Everything a session mutates. Lives behind a `StateHandle`.
#[derive(Debug, Default)]
pub struct SessionState {
  pub cart: Cart,
  pub snapshot: Option<ProductSnapshot>,
  pub selected: Option<Product>,
  notices: Vec<Notice>,
  revision: u64,
}

impl SessionState {
  /// Synchronous product sources, in lookup order.
  fn cached_product(&self, id: ProductId) -> Option<(Product, ResolvedFrom)> {
    if let Some(product) = self.snapshot.as_ref().and_then(|s| s.find(id)) {
      return Some((product.clone(), ResolvedFrom::SnapshotCache));
    }
    self
      .selected
      .as_ref()
      .filter(|product| product.id == id)
      .map(|product| (product.clone(), ResolvedFrom::SelectedProduct))
  }

  fn refresh(&mut self) {
    self.revision += 1;
  }

  fn notify(&mut self, message: &str) {
    if self.notices.len() >= MAX_PENDING_NOTICES {
      let excess = self.notices.len() + 1 - MAX_PENDING_NOTICES;
      self.notices.drain(..excess);
    }
    self.notices.push(Notice::new(message));
  }

  /// Inserts one unit of `product` and records the refresh and the notice.
  fn add_resolved(&mut self, product: Product, source: ResolvedFrom) -> AddOutcome {
    let product_id = product.id;
    let quantity = self.cart.add(product);
    self.refresh();
    self.notify(if quantity == 1 { ADDED_TO_CART } else { QUANTITY_UPDATED });
    AddOutcome {
      product_id,
      quantity,
      source,
    }
  }
}

enum Resolution {
  Done(AddOutcome),
  NeedsLookup,
}

pub struct Storefront {
  catalog: Arc<dyn Catalog>,
  state: StateHandle<SessionState>,
  lookups: InFlightLookups,
}

impl Storefront {
  pub fn new(catalog: Arc<dyn Catalog>) -> Self {
    Self {
      catalog,
      state: StateHandle::default(),
      lookups: InFlightLookups::new(),
    }
  }

  // --- Cart Store ---

  /// Adds one unit of product `id` to the cart.
  ///
  /// An existing line is incremented. Otherwise the product is taken from the
  /// last listing, then from the selected product, then looked up in the
  /// catalog; concurrent lookups for the same id share one request. A failed
  /// lookup leaves the cart unchanged.
  #[instrument(name = "Storefront::add_item", skip(self), fields(product_id = %id), err(Display))]
  pub async fn add_item(&self, id: ProductId) -> StorefrontResult<AddOutcome> {
    let resolution = self.state.update(|state| {
      if let Some(quantity) = state.cart.increment(id) {
        state.refresh();
        state.notify(QUANTITY_UPDATED);
        return Resolution::Done(AddOutcome {
          product_id: id,
          quantity,
          source: ResolvedFrom::Existing,
        });
      }
      match state.cached_product(id) {
        Some((product, source)) => Resolution::Done(state.add_resolved(product, source)),
        None => Resolution::NeedsLookup,
      }
    });

    let outcome = match resolution {
      Resolution::Done(outcome) => outcome,
      Resolution::NeedsLookup => {
        let product = self.lookups.resolve(id, &self.catalog).await?;
        // Another add for this id may have inserted the line while we waited.
        self.state.update(|state| state.add_resolved(product, ResolvedFrom::Catalog))
      }
    };

    info!(
      quantity = outcome.quantity,
      source = ?outcome.source,
      "Cart line updated."
    );
    Ok(outcome)
  }

  /// Adds `delta` to the quantity of line `id`; a line reaching 0 or below is removed.
  #[instrument(name = "Storefront::update_quantity", skip(self), fields(product_id = %id))]
  pub fn update_quantity(&self, id: ProductId, delta: i64) -> QuantityChange {
    let change = self.state.update(|state| {
      let change = state.cart.update_quantity(id, delta);
      if change != QuantityChange::Missing {
        state.refresh();
      }
      change
    });
    info!(?change, "Quantity change applied.");
    change
  }

  /// Removes line `id`. Returns whether a line was removed; removing an absent id is a no-op.
  #[instrument(name = "Storefront::remove_item", skip(self), fields(product_id = %id))]
  pub fn remove_item(&self, id: ProductId) -> bool {
    let removed = self.state.update(|state| {
      let removed = state.cart.remove(id);
      state.refresh();
      removed
    });
    info!(removed, "Remove applied.");
    removed
  }

  pub fn total_count(&self) -> u64 {
    self.state.map_read(|s| &s.cart).total_count()
  }

  /// Cart total rounded to 2 decimal places.
  pub fn total_price(&self) -> Decimal {
    self.state.map_read(|s| &s.cart).total_price()
  }

  /// A copy of the cart as it is now.
  pub fn cart(&self) -> Cart {
    self.state.read().cart.clone()
  }

  pub fn line(&self, id: ProductId) -> Option<CartLine> {
    self.state.read().cart.get(id).cloned()
  }

  /// Bumped on every cart mutation; views re-render when it changes.
  pub fn revision(&self) -> u64 {
    self.state.read().revision
  }

  /// Drains the notices issued since the last call.
  pub fn take_notices(&self) -> Vec<Notice> {
    std::mem::take(&mut self.state.write().notices)
  }

  // --- Catalog snapshots ---

  /// Lists products for `filter` and replaces the snapshot with the result.
  /// On failure the previous snapshot stays in place.
  #[instrument(name = "Storefront::load_products", skip(self), fields(category = %filter))]
  pub async fn load_products(&self, filter: CategoryFilter) -> StorefrontResult<Vec<Product>> {
    let products = self.catalog.list_products(&filter).await.map_err(|e| {
      warn!(error = %e, "Error fetching products.");
      e
    })?;
    self.state.write().snapshot = Some(ProductSnapshot::new(filter, products.clone()));
    Ok(products)
  }

  /// The trending strip. Does not touch the snapshot.
  pub async fn load_trending(&self, limit: usize) -> StorefrontResult<Vec<Product>> {
    self.catalog.list_trending(limit).await
  }

  pub async fn load_categories(&self) -> StorefrontResult<Vec<String>> {
    self.catalog.list_categories().await
  }

  pub fn snapshot(&self) -> Option<ProductSnapshot> {
    self.state.read().snapshot.clone()
  }

  // --- Detail view ---

  /// Fetches product `id` and makes it the selected product.
  #[instrument(name = "Storefront::open_product", skip(self), fields(product_id = %id))]
  pub async fn open_product(&self, id: ProductId) -> StorefrontResult<Product> {
    let product = self.catalog.get_product(id).await.map_err(|e| {
      warn!(error = %e, "Error fetching product details.");
      e
    })?;
    self.state.write().selected = Some(product.clone());
    Ok(product)
  }

  pub fn close_product(&self) {
    self.state.write().selected = None;
  }

  pub fn selected_product(&self) -> Option<Product> {
    self.state.read().selected.clone()
  }

  /// Adds the selected product to the cart and closes the detail view.
  /// Returns `None` when nothing is selected.
  pub async fn add_selected(&self) -> StorefrontResult<Option<AddOutcome>> {
    let Some(id) = self.state.read().selected.as_ref().map(|p| p.id) else {
      return Ok(None);
    };
    let outcome = self.add_item(id).await?;
    self.close_product();
    Ok(Some(outcome))
  }

  pub fn pending_lookups(&self) -> usize {
    self.lookups.pending()
  }
}
