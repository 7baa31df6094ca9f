// storefront/src/models/product.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier of a product. Also the identity key of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<u64> for ProductId {
  fn from(id: u64) -> Self {
    ProductId(id)
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
  /// 0.0 to 5.0
  #[serde(default)]
  pub rate: f64,
  #[serde(default)]
  pub count: u64,
}

/// A product record as served by the catalog. Read-only to the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  pub title: String,
  pub price: Decimal,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub image: String,
  #[serde(default)]
  pub rating: Rating,
}

impl Product {
  pub fn new(id: u64, title: impl Into<String>, price: Decimal) -> Self {
    Self {
      id: ProductId(id),
      title: title.into(),
      price,
      category: String::new(),
      description: String::new(),
      image: String::new(),
      rating: Rating::default(),
    }
  }

  pub fn with_category(mut self, category: impl Into<String>) -> Self {
    self.category = category.into();
    self
  }

  pub fn with_rating(mut self, rate: f64, count: u64) -> Self {
    self.rating = Rating { rate, count };
    self
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn with_image(mut self, image: impl Into<String>) -> Self {
    self.image = image.into();
    self
  }
}
