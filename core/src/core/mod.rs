pub mod state_handle;

pub use state_handle::StateHandle;
