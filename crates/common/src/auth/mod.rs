//! OAuth 2.0 client-credentials token management
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  TokenManager   │  Cache + single-flight refresh
//! └────────┬────────┘
//!          │
//!          └──► TokenSource (trait)
//!                    │
//!                    └──► ClientCredentialsClient  (form POST to token_url)
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use credify_common::auth::TokenManager;
//! use credify_domain::AuthConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AuthConfig {
//!     token_url: "https://auth.example.com/oauth/token".to_string(),
//!     client_id: "client-id".to_string(),
//!     client_secret: "client-secret".to_string(),
//! };
//! let manager = TokenManager::from_config(config, Duration::from_secs(30))?;
//!
//! // Fetches once, then serves from cache until 60s before expiry
//! let token = manager.get_access_token().await?;
//! # let _ = token;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - **[`types`]**: token endpoint response and cached token
//! - **[`client`]**: reqwest-backed client-credentials grant
//! - **[`token_manager`]**: caching and request coalescing
//! - **[`traits`]**: `TokenSource` seam for tests and alternative grants

pub mod client;
mod error;
pub mod token_manager;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use client::ClientCredentialsClient;
pub use error::TokenError;
pub use token_manager::TokenManager;
pub use traits::TokenSource;
pub use types::{AccessToken, TokenResponse};
