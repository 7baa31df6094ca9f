// storefront/src/store/mod.rs

pub mod notice;
pub mod storefront;

pub use notice::{Notice, ADDED_TO_CART, MAX_PENDING_NOTICES, QUANTITY_UPDATED};
pub use storefront::{SessionState, Storefront};
