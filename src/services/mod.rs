//! Service Layer
//!
//! Typed wrappers over the REST backend and the file-storage service.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ServiceHub                             │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐   │
//! │  │ *Service     │  │  ApiClient   │  │ StorageUploader  │   │
//! │  │ (resources)  │─▶│  (envelope)  │  │ (PUT to bucket)  │   │
//! │  └──────────────┘  └──────┬───────┘  └────────┬─────────┘   │
//! │                           ▼ Transport         ▼             │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼ Action (via thunks)
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Store (state layer)                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod api_client;
pub mod auth;
pub mod branches;
pub mod chat;
pub mod drivers;
pub mod envelope;
mod hub;
pub mod profile;
pub mod rate_plans;
pub mod reservations;
pub mod resource;
mod runtime;
pub mod storage;
pub mod transport;
pub mod vehicles;

pub use api_client::ApiClient;
pub use hub::*;
pub use runtime::*;
