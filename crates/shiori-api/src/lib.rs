//! HTTP client for the shiori tracking backend.
//!
//! The backend owns the list: every mutation goes through it and the
//! response carries the authoritative state, which callers apply to
//! the local store.

pub mod client;
pub mod error;
pub mod types;

pub use client::{AddOutcome, TrackerClient};
pub use error::ApiError;
