//! Request-scoped credential and token types.
//!
//! Nothing here is persisted. A [`Credentials`] value lives for one inbound
//! request and the [`AuthResult`] it produces is handed straight back to the
//! caller.

use serde::{Deserialize, Serialize};

use crate::error::{OAuthError, Result};
use crate::sanitize::sanitize_private_key;

/// Token lifetime reported when the provider omits `expires_in`.
pub const DEFAULT_EXPIRES_IN: u64 = 3600;

/// JWT-grant credentials for one exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Integration key of the requesting application.
    pub client_id: String,
    /// User on whose behalf the token is requested.
    pub user_id: String,
    /// OAuth server, with or without a scheme prefix.
    pub oauth_server: String,
    /// RSA private key in PEM form.
    pub private_key: String,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        user_id: impl Into<String>,
        oauth_server: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            user_id: user_id.into(),
            oauth_server: oauth_server.into(),
            private_key: private_key.into(),
        }
    }

    /// Bare OAuth host, as the token endpoint expects it.
    ///
    /// `https://account-d.docusign.com/` becomes `account-d.docusign.com`.
    pub fn oauth_host(&self) -> &str {
        let server = self.oauth_server.trim();
        let server = server
            .strip_prefix("https://")
            .or_else(|| server.strip_prefix("http://"))
            .unwrap_or(server);
        server.trim_end_matches('/')
    }

    /// Return a copy with the private key run through the sanitizer.
    pub fn sanitized(mut self) -> Self {
        self.private_key = sanitize_private_key(&self.private_key);
        self
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("user_id", &self.user_id)
            .field("oauth_server", &self.oauth_server)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Outcome of a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    pub access_token: String,
    pub account_id: String,
    pub base_path: String,
    pub expires_in: u64,
}

impl AuthResult {
    /// Check that all three required fields are present.
    pub fn validate(self) -> Result<Self> {
        if self.access_token.is_empty() {
            return Err(OAuthError::IncompleteResult("access token"));
        }
        if self.account_id.is_empty() {
            return Err(OAuthError::IncompleteResult("account id"));
        }
        if self.base_path.is_empty() {
            return Err(OAuthError::IncompleteResult("base path"));
        }
        Ok(self)
    }
}

/// Previously obtained token plus the account it is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthInfo {
    pub access_token: String,
    pub base_path: String,
    pub api_account_id: String,
}

impl From<&AuthResult> for AuthInfo {
    fn from(result: &AuthResult) -> Self {
        Self {
            access_token: result.access_token.clone(),
            base_path: result.base_path.clone(),
            api_account_id: result.account_id.clone(),
        }
    }
}
