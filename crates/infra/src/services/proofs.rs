//! Proof requests and presentation verification

use credify_domain::{CreateProofRequest, ProofRequest, ResourceKind, Result};
use serde_json::json;
use tracing::info;

use super::require_id;
use crate::api::ApiClient;

/// Proof-request operations scoped to the client's organization
#[derive(Debug, Clone, Copy)]
pub struct ProofManager<'a> {
    client: &'a ApiClient,
}

impl<'a> ProofManager<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Send a proof request over an existing connection
    ///
    /// # Errors
    /// Returns `CredifyError::Validation` if the request is incomplete (no
    /// request is sent), or the normalized request error
    pub async fn create_request(self, request: &CreateProofRequest) -> Result<ProofRequest> {
        request.validate()?;

        let org = self.client.organization_id();
        let proof: ProofRequest =
            self.client.post(&["organizations", org, "proof-requests"], request).await?;
        info!(
            proof_request_id = %proof.id,
            connection_id = %request.connection_id,
            attributes = request.attributes.len(),
            "proof request created"
        );
        Ok(proof)
    }

    /// Fetch one proof request
    ///
    /// # Errors
    /// Returns `CredifyError::Validation` for a blank id,
    /// `CredifyError::NotFound` if the platform has no such proof request, or
    /// the normalized request error
    pub async fn get(self, id: &str) -> Result<ProofRequest> {
        let id = require_id("proof request id", id)?;
        let org = self.client.organization_id();
        self.client
            .get_resource(
                &["organizations", org, "proof-requests", id],
                ResourceKind::ProofRequest,
                id,
            )
            .await
    }

    /// Ask the platform to verify the presentation received for a proof
    /// request
    ///
    /// # Errors
    /// Returns `CredifyError::Validation` for a blank id,
    /// `CredifyError::NotFound` if the platform has no such proof request, or
    /// the normalized request error
    pub async fn verify(self, id: &str) -> Result<ProofRequest> {
        let id = require_id("proof request id", id)?;
        let org = self.client.organization_id();
        let proof: ProofRequest = self
            .client
            .post_resource(
                &["organizations", org, "proof-requests", id, "verify"],
                &json!({}),
                ResourceKind::ProofRequest,
                id,
            )
            .await?;
        info!(proof_request_id = %proof.id, verified = ?proof.verified, "proof verified");
        Ok(proof)
    }
}
