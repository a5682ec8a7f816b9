//! Client configuration structures

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use crate::errors::{CredifyError, Result};

/// OAuth2 client-credentials settings.
///
/// The secret is never printed: `Debug` redacts it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for the platform API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Organization every platform path is scoped to
    pub organization_id: String,
    /// Client-credentials settings for the token endpoint
    pub auth: AuthConfig,
    /// Platform base URL (no trailing slash required)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Transport timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl ClientConfig {
    /// Create a configuration with default base URL and timeout.
    #[must_use]
    pub fn new(organization_id: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            organization_id: organization_id.into(),
            auth,
            base_url: default_base_url(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Override the platform base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the transport timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Transport timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Base URL without any trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Check that all required fields are present.
    ///
    /// # Errors
    /// Returns `CredifyError::Config` naming the first missing or invalid
    /// field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("organization_id", &self.organization_id),
            ("auth.token_url", &self.auth.token_url),
            ("auth.client_id", &self.auth.client_id),
            ("auth.client_secret", &self.auth.client_secret),
            ("base_url", &self.base_url),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CredifyError::config(format!("{field} is required")));
            }
        }

        if self.timeout_ms == 0 {
            return Err(CredifyError::config("timeout_ms must be greater than zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> AuthConfig {
        AuthConfig {
            token_url: "https://auth.example/oauth/token".into(),
            client_id: "client".into(),
            client_secret: "s3cret".into(),
        }
    }

    #[test]
    fn defaults_are_applied() {
        let config = ClientConfig::new("org-1", auth());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", auth());
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let mut config = ClientConfig::new("org-1", auth());
        config.auth.client_secret = "  ".into();
        let err = config.validate().unwrap_err();
        assert_eq!(err, CredifyError::config("auth.client_secret is required"));

        let config = ClientConfig::new("", auth());
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = ClientConfig::new("org-1", auth()).with_timeout_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        let config = ClientConfig::new("org-1", auth()).with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{
                "organization_id": "org-1",
                "auth": {
                    "token_url": "https://auth.example/token",
                    "client_id": "id",
                    "client_secret": "secret"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
