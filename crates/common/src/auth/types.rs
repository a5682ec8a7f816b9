//! OAuth 2.0 token types

use std::fmt;

use credify_domain::constants::TOKEN_SAFETY_MARGIN_MS;
use serde::{Deserialize, Serialize};

/// Token endpoint response body
///
/// Only `access_token` and `expires_in` are required; anything else the
/// server sends is ignored.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Cached bearer token with its absolute expiry
///
/// Replaced wholesale on every refresh, never mutated in place.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at_epoch_ms: u64,
}

impl AccessToken {
    /// Build a token issued at `now_ms`.
    #[must_use]
    pub fn issued_at(response: TokenResponse, now_ms: u64) -> Self {
        let lifetime_ms = response.expires_in.saturating_mul(1000);
        Self { value: response.access_token, expires_at_epoch_ms: now_ms.saturating_add(lifetime_ms) }
    }

    /// Bearer value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Absolute expiry in milliseconds since the UNIX epoch
    #[must_use]
    pub const fn expires_at_epoch_ms(&self) -> u64 {
        self.expires_at_epoch_ms
    }

    /// Check whether the token may still be handed out at `now_ms`
    ///
    /// Tokens stop being usable [`TOKEN_SAFETY_MARGIN_MS`] before their real
    /// expiry so a request never leaves with a token about to lapse.
    #[must_use]
    pub const fn is_usable(&self, now_ms: u64) -> bool {
        now_ms < self.expires_at_epoch_ms.saturating_sub(TOKEN_SAFETY_MARGIN_MS)
    }

    /// Milliseconds until the real expiry (zero once expired)
    #[must_use]
    pub const fn millis_until_expiry(&self, now_ms: u64) -> u64 {
        self.expires_at_epoch_ms.saturating_sub(now_ms)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("expires_at_epoch_ms", &self.expires_at_epoch_ms)
            .finish()
    }
}
