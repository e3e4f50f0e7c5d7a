//! State Management Layer
//!
//! A single [`Store`] holds one slice per concern. Data flows one way:
//!
//! ```text
//! command → thunk → service call → Action (channel) → Store::drain → slice
//! ```

mod auth_state;
mod chat_state;
mod collection;
mod drivers_state;
mod load_state;
mod notice_state;
mod profile_state;
mod reservations_state;
mod store;
pub mod thunks;
mod vehicles_state;

pub use auth_state::*;
pub use chat_state::*;
pub use collection::*;
pub use drivers_state::*;
pub use load_state::*;
pub use notice_state::*;
pub use profile_state::*;
pub use reservations_state::*;
pub use store::*;
pub use vehicles_state::*;
