// storefront/src/cart/outcome.rs

//! Results reported by Cart Store mutations.

use crate::models::ProductId;
use serde::Serialize;

/// Where `add_item` found the product record for the line it touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedFrom {
  /// A line for the product was already in the cart; no lookup happened.
  Existing,
  /// The last product listing fetched for this session.
  SnapshotCache,
  /// The product currently open in the detail view.
  SelectedProduct,
  /// A by-id lookup against the catalog.
  Catalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddOutcome {
  pub product_id: ProductId,
  /// Quantity of the line after the add.
  pub quantity: u32,
  pub source: ResolvedFrom,
}

impl AddOutcome {
  /// True when the add created a new line rather than bumping one.
  pub fn is_new_line(&self) -> bool {
    self.quantity == 1
  }
}
