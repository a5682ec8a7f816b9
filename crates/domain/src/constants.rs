//! Application constants
//!
//! Centralized location for domain-level constants shared by the token
//! manager and the API client.

// Token lifecycle
/// Tokens are treated as stale this long before their real expiry.
pub const TOKEN_SAFETY_MARGIN_MS: u64 = 60_000;

// Transport defaults
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_BASE_URL: &str = "https://api.credify.example";
pub const USER_AGENT: &str = concat!("credify/", env!("CARGO_PKG_VERSION"));

// OAuth2 client-credentials grant
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";
