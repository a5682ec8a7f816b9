//! Resource managers
//!
//! Thin, typed wrappers over [`ApiClient`](crate::api::ApiClient) for each
//! platform resource. Input is validated before any token is requested or
//! request sent, so a validation failure never touches the network.
//!
//! # Example
//!
//! ```no_run
//! use credify_infra::api::ApiClient;
//! use credify_infra::config::load;
//!
//! # async fn example() -> credify_domain::Result<()> {
//! let client = ApiClient::new(load()?)?;
//!
//! for connection in client.connections().list().await? {
//!     println!("{} {}", connection.id, connection.state);
//! }
//! # Ok(())
//! # }
//! ```

pub mod connections;
pub mod invitations;
pub mod proofs;

use credify_domain::{CredifyError, Result};

pub use connections::ConnectionManager;
pub use invitations::InvitationManager;
pub use proofs::ProofManager;

/// Reject blank identifiers before they end up in a URL path.
fn require_id<'a>(field: &str, id: &'a str) -> Result<&'a str> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(CredifyError::validation(format!("{field} is required")));
    }
    Ok(trimmed)
}
