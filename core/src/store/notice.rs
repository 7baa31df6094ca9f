// storefront/src/store/notice.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const ADDED_TO_CART: &str = "Added to cart!";
pub const QUANTITY_UPDATED: &str = "Quantity updated in cart!";

/// Undrained notices kept per session; older ones are dropped first.
pub const MAX_PENDING_NOTICES: usize = 5;

/// A one-shot message produced by a cart mutation (the toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
  pub message: String,
  pub issued_at: DateTime<Utc>,
}

impl Notice {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      issued_at: Utc::now(),
    }
  }
}
