//! Response classification
//!
//! Turns non-2xx platform responses into [`CredifyError`] variants. Transport
//! failures (no response at all) are mapped in [`crate::http`].

use credify_domain::{CredifyError, ResourceKind};
use reqwest::{Response, StatusCode};
use serde_json::Value;

/// Longest server message kept in an error
const MAX_MESSAGE_CHARS: usize = 512;

/// Classify a non-success response, consuming its body.
pub async fn error_from_response(response: Response) -> CredifyError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    classify_status(status, &body)
}

/// Classify a non-success status and its raw body.
///
/// - 401/403 → `Authentication`
/// - anything else → `Platform { status, message }`
///
/// The message is taken from the JSON body when the server provides one.
#[must_use]
pub fn classify_status(status: StatusCode, body: &str) -> CredifyError {
    let message = extract_message(body)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        CredifyError::authentication(message)
    } else {
        CredifyError::Platform { status: status.as_u16(), message }
    }
}

/// Translate a platform 404 into a typed "not found" for `resource`.
///
/// Every other error passes through unchanged.
#[must_use]
pub fn translate_not_found(err: CredifyError, resource: ResourceKind, id: &str) -> CredifyError {
    match err {
        CredifyError::Platform { status: 404, .. } => CredifyError::not_found(resource, id),
        other => other,
    }
}

/// Best-effort server message from an error body.
///
/// Looks at `message`, `error` (string or `{ "message": .. }`) and
/// `error_description`, in that order.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    let candidate = value
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| match value.get("error") {
            Some(Value::String(message)) => Some(message.as_str()),
            Some(Value::Object(inner)) => inner.get("message").and_then(Value::as_str),
            _ => None,
        })
        .or_else(|| value.get("error_description").and_then(Value::as_str))?;

    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_MESSAGE_CHARS).collect())
}
