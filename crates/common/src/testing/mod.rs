//! Test doubles shared by unit and integration tests.
//!
//! Enabled for this crate's own tests and, for downstream crates, through the
//! `test-utils` feature.

pub mod time;

pub use time::MockClock;
