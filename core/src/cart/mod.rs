// storefront/src/cart/mod.rs

pub mod inflight;
pub mod lines;
pub mod outcome;

pub use inflight::InFlightLookups;
pub use lines::{Cart, QuantityChange};
pub use outcome::{AddOutcome, ResolvedFrom};
