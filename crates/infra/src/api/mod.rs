//! Platform API client
//!
//! Authenticated access to the credential platform's REST API.
//!
//! # Architecture
//!
//! - Every request goes through [`BearerAuth`] before the transport sees it
//! - Tokens come from the shared single-flight `TokenManager`
//! - Non-2xx responses and transport failures are normalized to
//!   `CredifyError` and broadcast on the [`EventEmitter`]
//! - Resource managers in [`crate::services`] build on [`ApiClient`]

pub mod auth;
pub mod client;
pub mod errors;
pub mod events;

pub use auth::{AccessTokenProvider, BearerAuth};
pub use client::{ApiClient, ApiClientBuilder};
pub use errors::{classify_status, error_from_response, translate_not_found};
pub use events::{ClientEvent, EventEmitter, ListenerId};
