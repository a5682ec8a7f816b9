//! Token acquisition errors

use thiserror::Error;

/// Error type for token acquisition
///
/// `Clone` so that one failed refresh can be handed to every caller waiting
/// on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token endpoint could not be reached (DNS, connect, timeout)
    #[error("token request failed: {0}")]
    Transport(String),

    /// The token endpoint answered with a non-success status
    #[error("token endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The token endpoint answered 2xx with an unusable body
    #[error("malformed token response: {0}")]
    MalformedResponse(String),

    /// The owning token manager was dropped before the refresh settled
    #[error("token manager is no longer available")]
    Unavailable,
}

impl TokenError {
    /// Check if the failure happened before any response was received
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for TokenError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
