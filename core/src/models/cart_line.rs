// storefront/src/models/cart_line.rs

use super::product::{Product, ProductId};
use rust_decimal::Decimal;
use serde::Serialize;

/// One product-plus-quantity entry in a cart.
///
/// `quantity` is at least 1 for as long as the line is part of a cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
  #[serde(flatten)]
  pub product: Product,
  pub quantity: u32,
}

impl CartLine {
  pub fn new(product: Product) -> Self {
    Self { product, quantity: 1 }
  }

  pub fn id(&self) -> ProductId {
    self.product.id
  }

  pub fn line_total(&self) -> Decimal {
    self.product.price * Decimal::from(self.quantity)
  }
}
