// storefront/src/view/mod.rs

//! View models for the storefront page.
//!
//! Everything here is plain serializable data built from the cart and from
//! product records. Rendering to markup happens in the application.

use crate::cart::Cart;
use crate::error::StorefrontError;
use crate::models::{CartLine, CategoryFilter, Product, ProductId};
use crate::store::Notice;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

pub const NO_PRODUCTS: &str = "No products found.";
pub const PRODUCTS_FAILED: &str = "Failed to load products.";
pub const CART_EMPTY: &str = "Your cart is empty.";

/// `$` followed by the amount with exactly two decimals.
pub fn format_price(amount: Decimal) -> String {
  let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
  rounded.rescale(2);
  format!("${}", rounded)
}

/// Five star slots; slot `i` (1-based) is filled when `i <= round(rate)`.
pub fn stars(rate: f64) -> [bool; 5] {
  let filled = rate.round();
  let mut slots = [false; 5];
  for (i, slot) in slots.iter_mut().enumerate() {
    *slot = (i + 1) as f64 <= filled;
  }
  slots
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
  pub id: ProductId,
  pub title: String,
  pub category: String,
  pub image: String,
  pub price_label: String,
  pub rating_rate: f64,
  pub rating_count: u64,
  pub stars: [bool; 5],
}

impl From<&Product> for ProductCard {
  fn from(product: &Product) -> Self {
    Self {
      id: product.id,
      title: product.title.clone(),
      category: product.category.clone(),
      image: product.image.clone(),
      price_label: format_price(product.price),
      rating_rate: product.rating.rate,
      rating_count: product.rating.count,
      stars: stars(product.rating.rate),
    }
  }
}

/// A product grid, or the message shown in its place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridView {
  pub cards: Vec<ProductCard>,
  pub message: Option<String>,
  pub failed: bool,
}

impl GridView {
  pub fn from_products(products: &[Product]) -> Self {
    if products.is_empty() {
      return Self {
        cards: Vec::new(),
        message: Some(NO_PRODUCTS.to_string()),
        failed: false,
      };
    }
    Self {
      cards: products.iter().map(ProductCard::from).collect(),
      message: None,
      failed: false,
    }
  }

  pub fn failed() -> Self {
    Self {
      cards: Vec::new(),
      message: Some(PRODUCTS_FAILED.to_string()),
      failed: true,
    }
  }

  pub fn from_result(result: &Result<Vec<Product>, StorefrontError>) -> Self {
    match result {
      Ok(products) => Self::from_products(products),
      Err(_) => Self::failed(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryButton {
  pub name: String,
  pub active: bool,
}

/// The filter bar: an "all" button followed by one button per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBar {
  pub all_active: bool,
  pub buttons: Vec<CategoryButton>,
}

impl CategoryBar {
  pub fn new(categories: &[String], active: &CategoryFilter) -> Self {
    Self {
      all_active: active.is_all(),
      buttons: categories
        .iter()
        .map(|name| CategoryButton {
          name: name.clone(),
          active: active.as_str() == name.as_str(),
        })
        .collect(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineView {
  pub id: ProductId,
  pub title: String,
  pub category: String,
  pub image: String,
  pub quantity: u32,
  pub line_total_label: String,
}

impl From<&CartLine> for CartLineView {
  fn from(line: &CartLine) -> Self {
    Self {
      id: line.id(),
      title: line.product.title.clone(),
      category: line.product.category.clone(),
      image: line.product.image.clone(),
      quantity: line.quantity,
      line_total_label: format_price(line.line_total()),
    }
  }
}

/// The cart panel plus the header badge count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
  pub lines: Vec<CartLineView>,
  pub count: u64,
  pub total_label: String,
  pub empty_message: Option<String>,
}

impl From<&Cart> for CartView {
  fn from(cart: &Cart) -> Self {
    Self {
      lines: cart.lines().iter().map(CartLineView::from).collect(),
      count: cart.total_count(),
      total_label: format_price(cart.total_price()),
      empty_message: cart.is_empty().then(|| CART_EMPTY.to_string()),
    }
  }
}

/// Contents of the product detail overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
  pub id: ProductId,
  pub title: String,
  pub category: String,
  pub image: String,
  pub description: String,
  pub price_label: String,
  pub stars: [bool; 5],
  pub reviews_label: String,
}

impl From<&Product> for ProductDetail {
  fn from(product: &Product) -> Self {
    Self {
      id: product.id,
      title: product.title.clone(),
      category: product.category.clone(),
      image: product.image.clone(),
      description: product.description.clone(),
      price_label: format_price(product.price),
      stars: stars(product.rating.rate),
      reviews_label: format!("({} reviews)", product.rating.count),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeView {
  pub message: String,
}

impl From<&Notice> for NoticeView {
  fn from(notice: &Notice) -> Self {
    Self {
      message: notice.message.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn prices_always_show_two_decimals() {
    assert_eq!(format_price(Decimal::new(223, 1)), "$22.30");
    assert_eq!(format_price(Decimal::ZERO), "$0.00");
    assert_eq!(format_price(Decimal::new(109_955, 3)), "$109.96");
  }

  #[test]
  fn stars_follow_rounded_rate() {
    assert_eq!(stars(3.9), [true, true, true, true, false]);
    assert_eq!(stars(2.4), [true, true, false, false, false]);
    assert_eq!(stars(4.5), [true; 5]);
    assert_eq!(stars(0.0), [false; 5]);
  }

  #[test]
  fn empty_grid_shows_message() {
    let grid = GridView::from_products(&[]);
    assert!(grid.cards.is_empty());
    assert_eq!(grid.message.as_deref(), Some(NO_PRODUCTS));
    assert!(!grid.failed);
  }

  #[test]
  fn empty_cart_view() {
    let view = CartView::from(&Cart::new());
    assert_eq!(view.total_label, "$0.00");
    assert_eq!(view.count, 0);
    assert_eq!(view.empty_message.as_deref(), Some(CART_EMPTY));
  }

  #[test]
  fn category_bar_marks_active_button() {
    let categories = vec!["electronics".to_string(), "jewelery".to_string()];
    let bar = CategoryBar::new(&categories, &CategoryFilter::from("jewelery"));
    assert!(!bar.all_active);
    assert!(!bar.buttons[0].active);
    assert!(bar.buttons[1].active);
  }
}
