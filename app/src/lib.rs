// storefront_app/src/lib.rs

pub mod config;
pub mod errors;
pub mod session;
pub mod state;
pub mod templates;
pub mod web;

pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use session::{SessionId, SessionLimits, SessionRegistry, SESSION_COOKIE, SESSION_HEADER};
pub use state::AppState;
pub use web::configure_app_routes;
