//! rentdesk Client Library
//!
//! Management client for a car-rental REST backend: fleet (vehicle models
//! and units), branches, rate plans, reservations, drivers, chat and the
//! staff profile. The binary in `main.rs` drives it from the command line.

pub mod constants;
pub mod domain;
pub mod error;
pub mod filter;
pub mod forms;
pub mod helpers;
pub mod services;
pub mod session;
pub mod state;
pub mod utils;
