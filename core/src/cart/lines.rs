// storefront/src/cart/lines.rs

//! The ordered line list behind the Cart Store. Pure bookkeeping, no I/O.

use crate::models::{CartLine, Product, ProductId};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// What a quantity change did to the targeted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuantityChange {
  /// No line with that id was in the cart.
  Missing,
  /// The line is still present with this quantity.
  Updated { quantity: u32 },
  /// The quantity dropped to zero or below and the line was removed.
  Removed,
}

/// Ordered sequence of cart lines, in the order they were first added.
///
/// Holds at most one line per product id and never keeps a line at quantity 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
  lines: Vec<CartLine>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  pub fn get(&self, id: ProductId) -> Option<&CartLine> {
    self.lines.iter().find(|line| line.id() == id)
  }

  /// Bumps an existing line by one and returns its new quantity.
  pub fn increment(&mut self, id: ProductId) -> Option<u32> {
    let line = self.lines.iter_mut().find(|line| line.id() == id)?;
    line.quantity = line.quantity.saturating_add(1);
    Some(line.quantity)
  }

  /// Adds one unit of `product`: increments the existing line for its id,
  /// or appends a new line with quantity 1. Returns the resulting quantity.
  pub fn add(&mut self, product: Product) -> u32 {
    if let Some(quantity) = self.increment(product.id) {
      return quantity;
    }
    self.lines.push(CartLine::new(product));
    1
  }

  pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> QuantityChange {
    let Some(index) = self.lines.iter().position(|line| line.id() == id) else {
      return QuantityChange::Missing;
    };

    let next = i64::from(self.lines[index].quantity).saturating_add(delta);
    if next <= 0 {
      self.lines.remove(index);
      QuantityChange::Removed
    } else {
      let quantity = u32::try_from(next).unwrap_or(u32::MAX);
      self.lines[index].quantity = quantity;
      QuantityChange::Updated { quantity }
    }
  }

  /// Removes the line for `id`. Returns whether a line was removed.
  pub fn remove(&mut self, id: ProductId) -> bool {
    let before = self.lines.len();
    self.lines.retain(|line| line.id() != id);
    self.lines.len() != before
  }

  pub fn total_count(&self) -> u64 {
    self.lines.iter().map(|line| u64::from(line.quantity)).sum()
  }

  /// Sum of `price * quantity`, rounded to cents (half away from zero).
  pub fn total_price(&self) -> Decimal {
    self
      .lines
      .iter()
      .map(CartLine::line_total)
      .sum::<Decimal>()
      .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
  }
}
