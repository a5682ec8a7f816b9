//! Time sources
//!
//! Token expiry is tracked against wall-clock milliseconds since the UNIX
//! epoch. Code that needs "now" takes a [`Clock`] so tests can substitute
//! [`crate::testing::MockClock`].

mod clock;

pub use clock::{Clock, SystemClock};
