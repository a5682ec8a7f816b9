use std::time::Duration;

use credify_domain::constants::{DEFAULT_TIMEOUT_MS, USER_AGENT};
use credify_domain::{CredifyError, Result};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

/// HTTP client with a fixed timeout and user agent.
///
/// Each request is sent exactly once; a failure is reported to the caller
/// as-is.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Returns `CredifyError::Config` if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Underlying reqwest client, shared with the token endpoint client
    pub(crate) const fn reqwest(&self) -> &ReqwestClient {
        &self.client
    }

    /// Send a request
    ///
    /// Any HTTP status counts as a completed send; classifying it is the
    /// caller's job.
    ///
    /// # Errors
    /// Returns `CredifyError::Network` when no response was received, or
    /// `CredifyError::Config` when the request itself cannot be built.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build().map_err(map_transport_error)?;
        let (method, url) = (request.method().clone(), request.url().clone());
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(map_transport_error(err))
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: String,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS), user_agent: USER_AGENT.to_string() }
    }
}

impl HttpClientBuilder {
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `CredifyError::Config` if the TLS backend cannot be initialized.
    pub fn build(self) -> Result<HttpClient> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(|err| CredifyError::config(format!("failed to build HTTP client: {err}")))?;

        Ok(HttpClient { client })
    }
}

/// Map a reqwest failure that produced no response.
pub(crate) fn map_transport_error(err: reqwest::Error) -> CredifyError {
    if err.is_builder() {
        return CredifyError::config(format!("invalid request: {err}"));
    }
    if err.is_timeout() {
        return CredifyError::network(format!("request timed out: {err}"));
    }
    CredifyError::network(format!("HTTP request failed: {err}"))
}
