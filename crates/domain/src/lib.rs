//! # Credify Domain
//!
//! Business domain types and models for the Credify platform client.
//!
//! This crate contains:
//! - Platform resource types (invitations, connections, proof requests)
//! - Domain error types and Result definitions
//! - Client configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Credify crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
