//! Shared fixtures for infra integration tests

use std::net::TcpListener;
use std::time::Duration;

use credify_domain::{AuthConfig, ClientConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_PATH: &str = "/oauth/token";

/// Client configuration for `org-1` with the token endpoint on `auth` and the
/// platform at `base_url`.
pub fn config(auth: &MockServer, base_url: &str) -> ClientConfig {
    ClientConfig::new(
        "org-1",
        AuthConfig {
            token_url: format!("{}{TOKEN_PATH}", auth.uri()),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
        },
    )
    .with_base_url(base_url)
    .with_timeout_ms(2_000)
}

/// Mount a token endpoint handing out `token` valid for an hour.
pub async fn mount_token(server: &MockServer, token: &str, delay: Duration) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "access_token": token,
                    "expires_in": 3600,
                    "token_type": "Bearer"
                }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Address of a server that accepts connections and drops them without
/// answering.
pub fn resetting_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind resetting server");
    let addr = listener.local_addr().expect("local addr");
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            drop(stream);
        }
    });
    format!("http://{addr}")
}
