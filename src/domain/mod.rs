//! Domain - Pure Data Structures
//!
//! Entities as the REST backend defines them. These types do no I/O; they
//! only default optional fields for display.

pub mod branch;
pub mod chat;
pub mod rate_plan;
pub mod refs;
pub mod reservation;
pub mod settings;
pub mod user;
pub mod value;
pub mod vehicle;
