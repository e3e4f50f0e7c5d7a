//! Client-side Storage
//!
//! Settings and the logged-in session, persisted as TOML in the platform
//! config directory.

mod credentials;
mod settings_store;

pub use credentials::*;
pub use settings_store::*;
