//! Common test utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use tokio::sync::oneshot;

use dsproxy_oauth::SharedProvider;
use dsproxy_server::{Server, ServerConfig};

/// A proxy server running in the background on an ephemeral port.
pub struct TestServer {
    /// The server's address.
    pub addr: SocketAddr,
    /// HTTP client for talking to the server.
    pub client: Client,
    /// Dropping this stops the server.
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    /// Start a server with the given provider and config.
    pub async fn start(provider: SharedProvider, config: ServerConfig) -> Result<Self> {
        let (tx, rx) = oneshot::channel::<()>();
        let config = config.with_bind_address("127.0.0.1:0".parse()?);

        let addr = Server::new(provider, config)
            .run_with_shutdown(async move {
                let _ = rx.await;
            })
            .await?;

        Ok(Self {
            addr,
            client: Client::new(),
            _shutdown: tx,
        })
    }

    /// Get the base URL for the server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// POST a JSON body to `path`.
    pub fn post(&self, path: &str, body: &serde_json::Value) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url(), path))
            .json(body)
    }
}

/// Token request body used by most tests.
pub fn token_body(private_key: &str, oauth_server: &str) -> serde_json::Value {
    serde_json::json!({
        "dsJWTClientId": "C1",
        "impersonatedUserGuid": "U1",
        "dsOauthServer": oauth_server,
        "privateKey": private_key
    })
}
