//! Configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default request body limit (10 MB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Where hosting platforms mount secret files.
pub const DEFAULT_PRIVATE_KEY_PATH: &str = "/etc/secrets/private.key";

// ─────────────────────────────────────────────────────────────────────────────
// Root
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener settings.
    pub server: ServerSection,
    /// Default DocuSign credentials.
    pub docusign: DocuSignSection,
}

impl ProxyConfig {
    /// Parse a TOML string.
    pub fn from_toml(toml_str: &str) -> crate::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────────────────────────────────────

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Allow cross-origin requests from any origin.
    pub enable_cors: bool,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
    /// Reject token requests that carry no `AppToken` header.
    pub require_app_token: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            enable_cors: true,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            require_app_token: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DocuSign
// ─────────────────────────────────────────────────────────────────────────────

/// Server-side credential defaults.
///
/// Any field a token request omits is filled in from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocuSignSection {
    /// Integration key.
    pub client_id: Option<String>,
    /// Impersonated user GUID.
    pub user_id: Option<String>,
    /// OAuth server, e.g. `https://account-d.docusign.com`.
    pub oauth_server: Option<String>,
    /// Inline private key. Prefer `private_key_path`.
    pub private_key: Option<String>,
    /// Secret file holding the private key.
    pub private_key_path: PathBuf,
    /// Scheme for the OAuth host.
    pub oauth_scheme: String,
}

impl Default for DocuSignSection {
    fn default() -> Self {
        Self {
            client_id: None,
            user_id: None,
            oauth_server: None,
            private_key: None,
            private_key_path: PathBuf::from(DEFAULT_PRIVATE_KEY_PATH),
            oauth_scheme: "https".to_string(),
        }
    }
}
