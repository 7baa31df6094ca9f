// storefront/src/models/mod.rs

//! Data carried between the catalog, the cart and the views.

pub mod cart_line;
pub mod category;
pub mod product;

pub use cart_line::CartLine;
pub use category::CategoryFilter;
pub use product::{Product, ProductId, Rating};
