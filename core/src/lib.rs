// src/lib.rs

//! Storefront: cart bookkeeping and catalog access for a small REST-backed shop.
//!
//! The crate provides:
//!  - A `Cart` of product lines with add / update-quantity / remove and totals.
//!  - A `Catalog` trait with an HTTP implementation for fakestoreapi-style APIs
//!    and an in-memory one.
//!  - A per-session `Storefront` that owns the cart, the last product listing
//!    and the selected product, resolves products for `add_item` from those
//!    before asking the catalog, and shares concurrent catalog lookups.
//!  - View models (`view`) for product cards, the cart panel and the detail view.

pub mod cart;
pub mod catalog;
pub mod core;
pub mod error;
pub mod models;
pub mod store;
pub mod view;

// --- Re-exports for the Public API ---

pub use crate::cart::{AddOutcome, Cart, QuantityChange, ResolvedFrom};
pub use crate::catalog::{Catalog, HttpCatalog, MemoryCatalog, ProductSnapshot, DEFAULT_API_BASE};
pub use crate::core::StateHandle;
pub use crate::error::{StorefrontError, StorefrontResult};
pub use crate::models::{CartLine, CategoryFilter, Product, ProductId, Rating};
pub use crate::store::{Notice, Storefront};

/*
    Typical session:
    1. Build a catalog: `Arc::new(HttpCatalog::new(DEFAULT_API_BASE)?)`.
    2. `let shop = Storefront::new(catalog);`
    3. `shop.load_products(CategoryFilter::All).await?` fills the snapshot.
    4. `shop.add_item(id).await?`, `shop.update_quantity(id, -1)`, `shop.remove_item(id)`.
    5. Render `view::CartView::from(&shop.cart())` and drain `shop.take_notices()`.
*/
