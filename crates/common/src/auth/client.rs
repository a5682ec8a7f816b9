//! OAuth 2.0 client-credentials grant
//!
//! Performs one form-encoded `POST` against the token endpoint per call and
//! parses the JSON body. Caching and request coalescing live in
//! [`super::TokenManager`].

use std::time::Duration;

use async_trait::async_trait;
use credify_domain::constants::{DEFAULT_TIMEOUT_MS, GRANT_TYPE_CLIENT_CREDENTIALS, USER_AGENT};
use credify_domain::AuthConfig;
use reqwest::Client;
use tracing::{debug, warn};

use super::error::TokenError;
use super::traits::TokenSource;
use super::types::TokenResponse;

/// Longest error body kept in a [`TokenError::Status`]
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Client-credentials token client
///
/// Holds the immutable credentials for the lifetime of the instance. The
/// secret only ever leaves through the request body.
#[derive(Debug, Clone)]
pub struct ClientCredentialsClient {
    config: AuthConfig,
    client: Client,
}

impl ClientCredentialsClient {
    /// Create a client with the default 30 second timeout
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(config: AuthConfig) -> Result<Self, TokenError> {
        Self::with_timeout(config, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    /// Create a client with a custom request timeout
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built
    pub fn with_timeout(config: AuthConfig, timeout: Duration) -> Result<Self, TokenError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TokenError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Reuse an existing reqwest client (shares its connection pool)
    #[must_use]
    pub const fn with_http_client(config: AuthConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Get the configured token endpoint
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.config.token_url
    }

    /// Perform the client-credentials grant
    ///
    /// # Errors
    /// Returns error if:
    /// - The endpoint cannot be reached or times out
    /// - The endpoint answers with a non-2xx status
    /// - The body is not JSON or lacks `access_token`/`expires_in`
    pub async fn request_token(&self) -> Result<TokenResponse, TokenError> {
        let params = [
            ("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        debug!(token_url = %self.config.token_url, "requesting client-credentials token");

        let response = self.client.post(&self.config.token_url).form(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(token_url = %self.config.token_url, %status, "token endpoint rejected request");
            return Err(TokenError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body = response.bytes().await?;
        let token: TokenResponse = serde_json::from_slice(&body)
            .map_err(|e| TokenError::MalformedResponse(e.to_string()))?;

        if token.access_token.is_empty() {
            return Err(TokenError::MalformedResponse("access_token is empty".to_string()));
        }

        Ok(token)
    }
}

#[async_trait]
impl TokenSource for ClientCredentialsClient {
    async fn fetch_token(&self) -> Result<TokenResponse, TokenError> {
        self.request_token().await
    }
}
