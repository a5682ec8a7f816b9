//! Shared building blocks for Credify crates.
//!
//! - [`auth`]: client-credentials token lifecycle (cache, single-flight
//!   refresh)
//! - [`time`]: wall-clock abstraction used for expiry checks
//! - [`testing`]: controllable clock, behind the `test-utils` feature

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod time;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
pub use auth::{TokenError, TokenManager, TokenSource};
pub use time::{Clock, SystemClock};
