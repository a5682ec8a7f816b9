//! Platform API client
//!
//! Request pipeline:
//!
//! ```text
//! build URL ─► BearerAuth::decorate ─► HttpClient::send ─► classify / decode
//!                                                              │
//!                                   errors ─► EventEmitter ◄───┘
//! ```

use std::sync::Arc;

use credify_common::auth::{ClientCredentialsClient, TokenManager};
use credify_common::time::Clock;
use credify_domain::{ClientConfig, CredifyError, ResourceKind, Result};
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::auth::{AccessTokenProvider, BearerAuth};
use super::errors::{error_from_response, translate_not_found};
use super::events::{ClientEvent, EventEmitter, ListenerId};
use crate::http::HttpClient;
use crate::services::{ConnectionManager, InvitationManager, ProofManager};

/// Resource a request looks up by identifier, for 404 translation
#[derive(Debug, Clone, Copy)]
struct Lookup<'a> {
    resource: ResourceKind,
    id: &'a str,
}

/// Authenticated client for the credential platform
///
/// One instance owns one token cache; clients built from different
/// credentials never share tokens.
pub struct ApiClient {
    config: ClientConfig,
    http: HttpClient,
    auth: BearerAuth,
    events: EventEmitter,
}

impl ApiClient {
    /// Create a client that obtains tokens with the configured client
    /// credentials
    ///
    /// # Errors
    /// Returns `CredifyError::Config` if the configuration is incomplete or
    /// the HTTP transport cannot be built
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a builder for fluent configuration
    #[must_use]
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Client configuration
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Organization all platform paths are scoped to
    #[must_use]
    pub fn organization_id(&self) -> &str {
        &self.config.organization_id
    }

    /// Register a listener; see [`EventEmitter::on`]
    pub fn on<F>(&self, event: ClientEvent, listener: F) -> ListenerId
    where
        F: Fn(&CredifyError) + Send + Sync + 'static,
    {
        self.events.on(event, listener)
    }

    /// Remove a listener; see [`EventEmitter::off`]
    pub fn off(&self, event: ClientEvent, id: ListenerId) -> bool {
        self.events.off(event, id)
    }

    /// Drop cached credentials so the next request fetches a new token
    ///
    /// Delegates to [`AccessTokenProvider::clear`] of the configured provider.
    pub fn clear_tokens(&self) {
        self.auth.provider().clear();
    }

    /// Connection operations for this client's organization
    #[must_use]
    pub const fn connections(&self) -> ConnectionManager<'_> {
        ConnectionManager::new(self)
    }

    /// Proof-request operations for this client's organization
    #[must_use]
    pub const fn proofs(&self) -> ProofManager<'_> {
        ProofManager::new(self)
    }

    /// Invitation operations for this client's organization
    #[must_use]
    pub const fn invitations(&self) -> InvitationManager<'_> {
        InvitationManager::new(self)
    }

    /// Build an absolute URL from path segments below the base URL
    ///
    /// Segments are percent-encoded, so identifiers may contain any
    /// character.
    ///
    /// # Errors
    /// Returns `CredifyError::Config` if the base URL is not a valid
    /// hierarchical URL
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(self.config.base_url()).map_err(|e| {
            CredifyError::config(format!("invalid base_url {}: {e}", self.config.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| CredifyError::config("base_url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Execute a GET request
    ///
    /// # Errors
    /// Returns the normalized request error (also broadcast to listeners)
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        self.execute(Method::GET, segments, None, None).await
    }

    /// Execute a GET for a single resource, translating 404 into
    /// `CredifyError::NotFound`
    ///
    /// # Errors
    /// Returns the normalized request error (also broadcast to listeners)
    #[instrument(skip(self))]
    pub async fn get_resource<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        resource: ResourceKind,
        id: &str,
    ) -> Result<T> {
        self.execute(Method::GET, segments, None, Some(Lookup { resource, id })).await
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    /// Returns the normalized request error (also broadcast to listeners)
    #[instrument(skip(self, body))]
    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| CredifyError::validation(format!("Failed to serialize body: {e}")))?;
        self.execute(Method::POST, segments, Some(&body), None).await
    }

    /// Execute a POST against a single resource, translating 404 into
    /// `CredifyError::NotFound`
    ///
    /// # Errors
    /// Returns the normalized request error (also broadcast to listeners)
    #[instrument(skip(self, body))]
    pub async fn post_resource<B, T>(
        &self,
        segments: &[&str],
        body: &B,
        resource: ResourceKind,
        id: &str,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| CredifyError::validation(format!("Failed to serialize body: {e}")))?;
        self.execute(Method::POST, segments, Some(&body), Some(Lookup { resource, id })).await
    }

    /// Execute a DELETE for a single resource, translating 404 into
    /// `CredifyError::NotFound`
    ///
    /// # Errors
    /// Returns the normalized request error (also broadcast to listeners)
    #[instrument(skip(self))]
    pub async fn delete_resource(
        &self,
        segments: &[&str],
        resource: ResourceKind,
        id: &str,
    ) -> Result<()> {
        let _: Value =
            self.execute(Method::DELETE, segments, None, Some(Lookup { resource, id })).await?;
        Ok(())
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&Value>,
        lookup: Option<Lookup<'_>>,
    ) -> Result<T> {
        match self.dispatch(method.clone(), segments, body).await {
            Ok(value) => Ok(value),
            Err(err) => {
                let err = match lookup {
                    Some(Lookup { resource, id }) => translate_not_found(err, resource, id),
                    None => err,
                };
                warn!(%method, kind = %err.kind(), status = ?err.status(), error = %err, "platform request failed");
                self.events.emit_error(&err);
                Err(err)
            }
        }
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&Value>,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "platform request");

        let mut request = self.http.request(method, url).header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let request = self.auth.decorate(request).await?;
        let response = self.http.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CredifyError::network(format!("Failed to read response body: {e}")))?;

        if status == StatusCode::NO_CONTENT
            || status == StatusCode::RESET_CONTENT
            || bytes.iter().all(u8::is_ascii_whitespace)
        {
            return serde_json::from_value(Value::Null).map_err(|_| {
                CredifyError::decode(format!(
                    "empty response ({}) cannot be decoded into the expected type",
                    status.as_u16()
                ))
            });
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| CredifyError::decode(format!("Failed to parse response: {e}")))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("organization_id", &self.config.organization_id)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ClientConfig>,
    token_provider: Option<Arc<dyn AccessTokenProvider>>,
    http_client: Option<HttpClient>,
    clock: Option<Arc<dyn Clock>>,
}

impl ApiClientBuilder {
    /// Set the client configuration
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a custom token provider instead of the built-in client-credentials
    /// token manager
    #[must_use]
    pub fn token_provider(mut self, provider: Arc<dyn AccessTokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Use a preconfigured transport
    #[must_use]
    pub fn http_client(mut self, http_client: HttpClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Clock used by the built-in token manager for expiry checks
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    /// Returns `CredifyError::Config` if the configuration is missing or
    /// invalid, or the transport cannot be built
    pub fn build(self) -> Result<ApiClient> {
        let config =
            self.config.ok_or_else(|| CredifyError::config("client configuration not set"))?;
        config.validate()?;

        let http = match self.http_client {
            Some(http) => http,
            None => HttpClient::builder().timeout(config.timeout()).build()?,
        };

        let provider = match self.token_provider {
            Some(provider) => provider,
            None => Arc::new(build_token_manager(&config, &http, self.clock)),
        };

        Ok(ApiClient { config, http, auth: BearerAuth::new(provider), events: EventEmitter::new() })
    }
}

/// Client-credentials token manager that sends token requests over the
/// platform transport
fn build_token_manager(
    config: &ClientConfig,
    http: &HttpClient,
    clock: Option<Arc<dyn Clock>>,
) -> TokenManager {
    let source = ClientCredentialsClient::with_http_client(config.auth.clone(), http.reqwest().clone());
    debug!(token_url = source.token_url(), "using client-credentials token manager");

    let source = Arc::new(source);
    match clock {
        Some(clock) => TokenManager::with_clock(source, clock),
        None => TokenManager::new(source),
    }
}
