//! # Credify Infrastructure
//!
//! Everything in Credify that performs I/O.
//!
//! This crate contains:
//! - HTTP transport (reqwest with timeout)
//! - The authenticated platform API client and its error channel
//! - Resource managers for invitations, connections and proof requests
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Token caching lives in `credify-common`; this crate only consumes it
//!   through [`api::AccessTokenProvider`]
//! - Every failure is normalized to `credify_domain::CredifyError`

#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod http;
pub mod observability;
pub mod services;

// Re-export commonly used items
pub use api::{ApiClient, ClientEvent, ListenerId};
pub use http::{HttpClient, HttpClientBuilder};
pub use services::{ConnectionManager, InvitationManager, ProofManager};
