//! Traits for token acquisition
//!
//! These traits enable dependency injection and testing by abstracting
//! the authorization server.

use async_trait::async_trait;

use super::error::TokenError;
use super::types::TokenResponse;

/// Trait for performing a token grant
///
/// [`super::TokenManager`] calls this at most once per refresh. Implementors
/// perform exactly one request and never cache.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Request a fresh access token
    ///
    /// # Errors
    /// Returns error if the request fails, the server answers with a
    /// non-success status, or the body is not a valid token response
    async fn fetch_token(&self) -> Result<TokenResponse, TokenError>;
}
