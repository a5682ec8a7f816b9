//! Platform resource types
//!
//! Only the fields the client reads are typed. Unknown fields returned by the
//! platform are ignored on deserialization, and optional fields tolerate
//! being absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CredifyError, Result};

/// Connection invitation created on the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: String,
    /// URL encoded into the QR code shown to the holder
    pub invitation_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for invitation creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInvitation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub multi_use: bool,
}

/// Established (or pending) connection with a holder's wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub their_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Attribute requested from the holder in a proof request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedAttribute {
    pub name: String,
    /// Platform-specific restriction objects (issuer, schema, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<serde_json::Value>,
}

impl RequestedAttribute {
    /// Attribute with no restrictions.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), restrictions: Vec::new() }
    }
}

/// Request body for proof-request creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProofRequest {
    pub connection_id: String,
    pub name: String,
    pub attributes: Vec<RequestedAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl CreateProofRequest {
    /// Check caller input before anything is sent.
    ///
    /// # Errors
    /// Returns `CredifyError::Validation` when the connection id or name is
    /// blank, the attribute list is empty, or an attribute has a blank name.
    pub fn validate(&self) -> Result<()> {
        if self.connection_id.trim().is_empty() {
            return Err(CredifyError::validation("connection_id is required"));
        }
        if self.name.trim().is_empty() {
            return Err(CredifyError::validation("proof request name is required"));
        }
        if self.attributes.is_empty() {
            return Err(CredifyError::validation("at least one attribute must be requested"));
        }
        if let Some(index) = self.attributes.iter().position(|a| a.name.trim().is_empty()) {
            return Err(CredifyError::validation(format!("attribute {index} has an empty name")));
        }
        Ok(())
    }
}

/// Proof request as tracked by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofRequest {
    pub id: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    /// Set once the platform has checked the presentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Revealed attributes, shape defined by the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Paged list envelope some platform endpoints wrap results in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Wrapped { items: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Unwrap into the contained items.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Wrapped { items } | Self::Bare(items) => items,
        }
    }
}
