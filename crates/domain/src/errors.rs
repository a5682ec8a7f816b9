//! Error types used throughout the client

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Platform resource named in a [`CredifyError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Connection,
    ProofRequest,
    Invitation,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection => write!(f, "Connection"),
            Self::ProofRequest => write!(f, "Proof request"),
            Self::Invitation => write!(f, "Invitation"),
        }
    }
}

/// Stable error labels for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Token acquisition failed or the platform answered 401/403
    Authentication,
    /// Any other non-2xx platform response
    Platform,
    /// The request never produced a response
    Network,
    /// Caller input rejected before any I/O
    Validation,
    /// Lookup by identifier answered 404
    NotFound,
    /// Invalid or missing configuration
    Config,
    /// 2xx response with an unexpected body
    Decode,
}

impl ErrorKind {
    /// Label suitable for structured log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Platform => "platform",
            Self::Network => "network",
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Config => "config",
            Self::Decode => "decode",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for Credify
///
/// Every failure surfaced by the API client is normalized into one of these
/// variants so callers can branch on the kind instead of inspecting raw
/// transport errors.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CredifyError {
    #[error("Authentication error: {message}")]
    Authentication { message: String },

    #[error("Platform error ({status}): {message}")]
    Platform { status: u16, message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{resource} not found: {id}")]
    NotFound { resource: ResourceKind, id: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },
}

impl CredifyError {
    /// Build an [`CredifyError::Authentication`].
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication { message: message.into() }
    }

    /// Build a [`CredifyError::Network`].
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Build a [`CredifyError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    /// Build a [`CredifyError::Config`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Build a [`CredifyError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode { message: message.into() }
    }

    /// Build a [`CredifyError::NotFound`].
    pub fn not_found(resource: ResourceKind, id: impl Into<String>) -> Self {
        Self::NotFound { resource, id: id.into() }
    }

    /// Get the error kind for this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::Platform { .. } => ErrorKind::Platform,
            Self::Network { .. } => ErrorKind::Network,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Config { .. } => ErrorKind::Config,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// HTTP status carried by the error.
    ///
    /// Only platform errors carry one; network errors never reached the
    /// server and report `None`.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Platform { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

/// Result type alias for Credify operations
pub type Result<T> = std::result::Result<T, CredifyError>;
