//! Connection invitations

use credify_domain::{CreateInvitation, Invitation, Result};
use tracing::info;

use crate::api::ApiClient;

/// Invitation operations scoped to the client's organization
#[derive(Debug, Clone, Copy)]
pub struct InvitationManager<'a> {
    client: &'a ApiClient,
}

impl<'a> InvitationManager<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create an invitation a holder can accept to open a connection
    ///
    /// # Errors
    /// Returns the normalized request error
    pub async fn create(self, request: &CreateInvitation) -> Result<Invitation> {
        let org = self.client.organization_id();
        let invitation: Invitation =
            self.client.post(&["organizations", org, "invitations"], request).await?;
        info!(invitation_id = %invitation.id, multi_use = request.multi_use, "invitation created");
        Ok(invitation)
    }
}

#[cfg(test)]
mod tests {
    use credify_domain::{CreateInvitation, CredifyError};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::services::test_support::client;

    #[tokio::test]
    async fn create_posts_request_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/organizations/org-1/invitations"))
            .and(body_json(serde_json::json!({ "label": "Front desk", "multi_use": true })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "inv-1",
                "invitation_url": "https://wallet.example/invite?c_i=abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = CreateInvitation {
            label: Some("Front desk".to_string()),
            alias: None,
            multi_use: true,
        };
        let invitation = client(&server).invitations().create(&request).await.unwrap();

        assert_eq!(invitation.id, "inv-1");
        assert!(invitation.connection_id.is_none());
    }

    #[tokio::test]
    async fn rejected_invitation_carries_platform_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(serde_json::json!({ "message": "label too long" })),
            )
            .mount(&server)
            .await;

        let err =
            client(&server).invitations().create(&CreateInvitation::default()).await.unwrap_err();
        assert_eq!(err, CredifyError::Platform { status: 422, message: "label too long".into() });
    }
}
