//! Token manager with single-flight refresh
//!
//! Manages the client-credentials token lifecycle:
//! - Cached token reuse until the safety margin before expiry
//! - At most one token-endpoint request in flight per manager
//! - Every concurrent caller shares the outcome of that request
//! - Failed refreshes leave no residue; the next call starts over

use std::sync::{Arc, Weak};
use std::time::Duration;

use credify_domain::AuthConfig;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::client::ClientCredentialsClient;
use super::error::TokenError;
use super::traits::TokenSource;
use super::types::{AccessToken, TokenResponse};
use crate::time::{Clock, SystemClock};

type RefreshOperation = Shared<BoxFuture<'static, Result<String, TokenError>>>;

/// Handle to the refresh currently talking to the token endpoint
struct PendingRefresh {
    generation: u64,
    operation: RefreshOperation,
}

#[derive(Default)]
struct TokenState {
    token: Option<AccessToken>,
    pending: Option<PendingRefresh>,
    generation: u64,
}

/// Token manager for the client-credentials flow
///
/// State is owned by the instance and never shared between managers. The
/// lock around it is only held for synchronous check-then-act sections and
/// never across an `.await`.
pub struct TokenManager {
    source: Arc<dyn TokenSource>,
    clock: Arc<dyn Clock>,
    state: Arc<Mutex<TokenState>>,
}

impl TokenManager {
    /// Create a token manager over any token source, using the system clock
    #[must_use]
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self::with_clock(source, Arc::new(SystemClock))
    }

    /// Create a token manager with an explicit clock
    #[must_use]
    pub fn with_clock(source: Arc<dyn TokenSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock, state: Arc::new(Mutex::new(TokenState::default())) }
    }

    /// Create a token manager that performs the client-credentials grant
    /// against `config.token_url`
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built
    pub fn from_config(config: AuthConfig, timeout: Duration) -> Result<Self, TokenError> {
        let client = ClientCredentialsClient::with_timeout(config, timeout)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Get a currently valid access token
    ///
    /// Returns the cached token when it is outside the safety margin,
    /// otherwise joins the refresh already in flight or starts one.
    ///
    /// # Errors
    /// Returns the refresh failure. Every caller waiting on the same refresh
    /// receives the same error, and the next call retries from scratch.
    pub async fn get_access_token(&self) -> Result<String, TokenError> {
        let operation = {
            let mut state = self.state.lock();
            let now = self.clock.millis_since_epoch();

            if let Some(token) = state.token.as_ref().filter(|t| t.is_usable(now)) {
                debug!("using cached access token");
                return Ok(token.value().to_string());
            }

            if let Some(pending) = state.pending.as_ref() {
                debug!(generation = pending.generation, "joining in-flight token refresh");
                pending.operation.clone()
            } else {
                state.generation += 1;
                let generation = state.generation;
                let operation = self.refresh_operation(generation);
                state.pending = Some(PendingRefresh { generation, operation: operation.clone() });
                debug!(generation, "starting token refresh");
                operation
            }
        };

        operation.await
    }

    /// Drop the cached token and forget any in-flight refresh
    ///
    /// A request already on the wire is not cancelled; if it succeeds it
    /// still stores its token when it lands.
    pub fn clear_tokens(&self) {
        let mut state = self.state.lock();
        state.token = None;
        state.pending = None;
        debug!("access token cleared");
    }

    /// Check if a usable token is cached right now
    #[must_use]
    pub fn has_valid_token(&self) -> bool {
        let now = self.clock.millis_since_epoch();
        self.state.lock().token.as_ref().is_some_and(|t| t.is_usable(now))
    }

    /// Check if a refresh is currently in flight
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.state.lock().pending.is_some()
    }

    /// Milliseconds until the cached token's real expiry
    ///
    /// # Returns
    /// `None` when no token is cached
    #[must_use]
    pub fn millis_until_expiry(&self) -> Option<u64> {
        let now = self.clock.millis_since_epoch();
        self.state.lock().token.as_ref().map(|t| t.millis_until_expiry(now))
    }

    /// Build the shared refresh future for `generation`
    ///
    /// The future settles the state itself, so the pending handle is cleared
    /// on success and failure alike, whichever waiter happens to drive it.
    fn refresh_operation(&self, generation: u64) -> RefreshOperation {
        let source = Arc::clone(&self.source);
        let clock = Arc::clone(&self.clock);
        let state = Arc::downgrade(&self.state);

        async move {
            let result = source.fetch_token().await;
            settle(&state, clock.as_ref(), generation, result)
        }
        .boxed()
        .shared()
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("has_valid_token", &self.has_valid_token())
            .field("is_refreshing", &self.is_refreshing())
            .finish_non_exhaustive()
    }
}

fn settle(
    state: &Weak<Mutex<TokenState>>,
    clock: &dyn Clock,
    generation: u64,
    result: Result<TokenResponse, TokenError>,
) -> Result<String, TokenError> {
    let Some(state) = state.upgrade() else {
        return Err(TokenError::Unavailable);
    };
    let mut state = state.lock();

    // A clear_tokens() (and possibly a newer refresh) may have happened
    // while this request was on the wire.
    if state.pending.as_ref().is_some_and(|p| p.generation == generation) {
        state.pending = None;
    }

    match result {
        Ok(response) => {
            let now = clock.millis_since_epoch();
            let expires_in = response.expires_in;
            let token = AccessToken::issued_at(response, now);
            if !token.is_usable(now) {
                warn!(expires_in, "token lifetime is shorter than the safety margin");
            }
            let value = token.value().to_string();
            state.token = Some(token);
            info!(generation, expires_in, "access token refreshed");
            Ok(value)
        }
        Err(err) => {
            warn!(generation, error = %err, "access token refresh failed");
            Err(err)
        }
    }
}
