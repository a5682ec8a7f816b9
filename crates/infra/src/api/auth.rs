//! Bearer-token injection for outbound platform requests
//!
//! [`BearerAuth`] is the explicit pre-request step of the client pipeline:
//! the request is decorated with a fresh token and only then handed to the
//! transport.

use std::sync::Arc;

use async_trait::async_trait;
use credify_common::auth::TokenManager;
use credify_domain::{CredifyError, Result};
use reqwest::RequestBuilder;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    ///
    /// # Errors
    /// Returns `CredifyError::Authentication` if no token can be obtained
    async fn access_token(&self) -> Result<String>;

    /// Forget any cached credentials (logout / test reset)
    ///
    /// Providers without a cache implement this as a no-op.
    fn clear(&self);
}

/// Allow `TokenManager` to be used anywhere an
/// `AccessTokenProvider` is required.
#[async_trait]
impl AccessTokenProvider for TokenManager {
    async fn access_token(&self) -> Result<String> {
        self.get_access_token()
            .await
            .map_err(|e| CredifyError::authentication(format!("Failed to obtain access token: {e}")))
    }

    fn clear(&self) {
        self.clear_tokens();
    }
}

/// Pre-request hook attaching `Authorization: Bearer <token>`
#[derive(Clone)]
pub struct BearerAuth {
    provider: Arc<dyn AccessTokenProvider>,
}

impl BearerAuth {
    /// Wrap a token provider
    #[must_use]
    pub fn new(provider: Arc<dyn AccessTokenProvider>) -> Self {
        Self { provider }
    }

    /// Attach a valid bearer token to `request`
    ///
    /// # Errors
    /// Returns the provider's authentication error; the request is dropped
    /// and never sent.
    pub async fn decorate(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.provider.access_token().await?;
        Ok(request.bearer_auth(token))
    }

    /// Underlying token provider
    #[must_use]
    pub fn provider(&self) -> &Arc<dyn AccessTokenProvider> {
        &self.provider
    }
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::AUTHORIZATION;
    use reqwest::{Client, Method};

    use super::*;

    struct StaticProvider(&'static str);

    #[async_trait]
    impl AccessTokenProvider for StaticProvider {
        async fn access_token(&self) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn clear(&self) {}
    }

    struct FailingProvider;

    #[async_trait]
    impl AccessTokenProvider for FailingProvider {
        async fn access_token(&self) -> Result<String> {
            Err(CredifyError::authentication("token endpoint unreachable"))
        }

        fn clear(&self) {}
    }

    #[tokio::test]
    async fn decorate_sets_bearer_header() {
        let auth = BearerAuth::new(Arc::new(StaticProvider("test-token")));
        let client = Client::new();

        let request = auth
            .decorate(client.request(Method::GET, "http://localhost/connections"))
            .await
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.headers()[AUTHORIZATION], "Bearer test-token");
    }

    #[tokio::test]
    async fn decorate_propagates_auth_failure() {
        let auth = BearerAuth::new(Arc::new(FailingProvider));
        let client = Client::new();

        let err = auth
            .decorate(client.request(Method::GET, "http://localhost/connections"))
            .await
            .unwrap_err();

        assert_eq!(err, CredifyError::authentication("token endpoint unreachable"));
    }
}
