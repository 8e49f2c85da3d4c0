//! Core domain logic for the Shiori anime tracker client.
//!
//! Everything here is runtime-free: the list store, sort order,
//! press-and-hold state machine, and search debounce are plain state
//! types driven by the GUI's event loop and timers.

pub mod config;
pub mod debounce;
pub mod error;
pub mod hold;
pub mod models;
pub mod store;

pub use error::ShioriError;
