//! Server configuration.

use std::net::{IpAddr, SocketAddr};

use dsproxy_config::{DEFAULT_MAX_BODY_SIZE, ProxyConfig, resolve_private_key};

use crate::error::{Result, ServerError};

/// Credential defaults applied to token requests that omit a field.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialDefaults {
    pub client_id: Option<String>,
    pub user_id: Option<String>,
    pub oauth_server: Option<String>,
    pub private_key: Option<String>,
}

impl std::fmt::Debug for CredentialDefaults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialDefaults")
            .field("client_id", &self.client_id)
            .field("user_id", &self.user_id)
            .field("oauth_server", &self.oauth_server)
            .field("private_key", &self.private_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to.
    pub bind_address: SocketAddr,

    /// Allow any origin via CORS.
    pub enable_cors: bool,

    /// Maximum REST request body size in bytes.
    pub max_body_size: usize,

    /// Require the `AppToken` header on token requests.
    pub require_app_token: bool,

    /// Server-side credential defaults.
    pub defaults: CredentialDefaults,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], dsproxy_config::DEFAULT_PORT)),
            enable_cors: true,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            require_app_token: false,
            defaults: CredentialDefaults::default(),
        }
    }
}

impl ServerConfig {
    /// Build from a loaded [`ProxyConfig`], reading the private key secret.
    pub fn from_proxy_config(config: &ProxyConfig) -> Result<Self> {
        let ip: IpAddr = config.server.host.parse().map_err(|_| {
            ServerError::Config(format!("invalid bind host '{}'", config.server.host))
        })?;

        let private_key = resolve_private_key(&config.docusign).map(|secret| {
            tracing::info!(source = %secret.source, "Default private key loaded");
            secret.value
        });

        Ok(Self {
            bind_address: SocketAddr::new(ip, config.server.port),
            enable_cors: config.server.enable_cors,
            max_body_size: config.server.max_body_size,
            require_app_token: config.server.require_app_token,
            defaults: CredentialDefaults {
                client_id: config.docusign.client_id.clone(),
                user_id: config.docusign.user_id.clone(),
                oauth_server: config.docusign.oauth_server.clone(),
                private_key,
            },
        })
    }

    /// Set the bind address.
    pub fn with_bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr;
        self
    }

    /// Enable or disable the mandatory `AppToken` header.
    pub fn with_require_app_token(mut self, required: bool) -> Self {
        self.require_app_token = required;
        self
    }

    /// Set the credential defaults.
    pub fn with_defaults(mut self, defaults: CredentialDefaults) -> Self {
        self.defaults = defaults;
        self
    }
}
