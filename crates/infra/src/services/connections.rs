//! Connections between the organization and holder wallets

use credify_domain::{Connection, ListResponse, ResourceKind, Result};
use tracing::debug;

use super::require_id;
use crate::api::ApiClient;

/// Connection operations scoped to the client's organization
#[derive(Debug, Clone, Copy)]
pub struct ConnectionManager<'a> {
    client: &'a ApiClient,
}

impl<'a> ConnectionManager<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List every connection of the organization
    ///
    /// # Errors
    /// Returns the normalized request error
    pub async fn list(self) -> Result<Vec<Connection>> {
        let org = self.client.organization_id();
        let response: ListResponse<Connection> =
            self.client.get(&["organizations", org, "connections"]).await?;
        let connections = response.into_items();
        debug!(count = connections.len(), "listed connections");
        Ok(connections)
    }

    /// Fetch one connection
    ///
    /// # Errors
    /// Returns `CredifyError::Validation` for a blank id,
    /// `CredifyError::NotFound` if the platform has no such connection, or the
    /// normalized request error
    pub async fn get(self, id: &str) -> Result<Connection> {
        let id = require_id("connection id", id)?;
        let org = self.client.organization_id();
        self.client
            .get_resource(&["organizations", org, "connections", id], ResourceKind::Connection, id)
            .await
    }

    /// Delete one connection
    ///
    /// # Errors
    /// Returns `CredifyError::Validation` for a blank id,
    /// `CredifyError::NotFound` if the platform has no such connection, or the
    /// normalized request error
    pub async fn delete(self, id: &str) -> Result<()> {
        let id = require_id("connection id", id)?;
        let org = self.client.organization_id();
        self.client
            .delete_resource(
                &["organizations", org, "connections", id],
                ResourceKind::Connection,
                id,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use credify_domain::CredifyError;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::services::test_support::client;

    #[tokio::test]
    async fn list_accepts_bare_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations/org-1/connections"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "c-1", "state": "active" },
                { "id": "c-2", "state": "invitation", "their_label": "Alice" }
            ])))
            .mount(&server)
            .await;

        let connections = client(&server).connections().list().await.unwrap();
        assert_eq!(connections.len(), 2);
        assert_eq!(connections[1].their_label.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn list_accepts_items_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations/org-1/connections"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{ "id": "c-1", "state": "active" }],
                "total": 1
            })))
            .mount(&server)
            .await;

        let connections = client(&server).connections().list().await.unwrap();
        assert_eq!(connections[0].id, "c-1");
    }

    #[tokio::test]
    async fn get_missing_connection_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations/org-1/connections/c-404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({ "message": "no" })),
            )
            .mount(&server)
            .await;

        let err = client(&server).connections().get("c-404").await.unwrap_err();
        assert_eq!(err.to_string(), "Connection not found: c-404");
    }

    #[tokio::test]
    async fn delete_accepts_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/organizations/org-1/connections/c-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).connections().delete("c-1").await.unwrap();
    }

    #[tokio::test]
    async fn blank_id_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server).connections().get(" ").await.unwrap_err();
        assert!(matches!(err, CredifyError::Validation { .. }));
    }
}
