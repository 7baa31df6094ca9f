// storefront_app/src/web/handlers/mod.rs

pub mod cart_handlers;
pub mod page_handlers;
pub mod product_handlers;
