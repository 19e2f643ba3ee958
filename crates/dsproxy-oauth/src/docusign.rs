//! reqwest client for the DocuSign identity and eSignature REST endpoints.
//!
//! Token exchange runs in two steps:
//!
//! 1. `POST https://<oauth host>/oauth/token` with a signed JWT assertion.
//! 2. `GET https://<oauth host>/oauth/userinfo` to find the default account
//!    and its base URI.
//!
//! Every failure is terminal. There are no retries, and provider error
//! bodies are preserved so callers can diagnose consent or signature
//! problems.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, header};
use serde::{Deserialize, Deserializer};

use crate::error::{OAuthError, Result};
use crate::jwt::{JWT_LIFETIME_SECS, build_assertion};
use crate::provider::SignatureProvider;
use crate::sanitize::first_line;
use crate::types::{AuthInfo, AuthResult, Credentials, DEFAULT_EXPIRES_IN};

/// Grant type for the JWT bearer flow.
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Suffix appended to an account's base URI to form the REST base path.
pub const REST_API_SUFFIX: &str = "/restapi";

/// Document id that selects every document of an envelope merged into one PDF.
pub const COMBINED_DOCUMENT: &str = "combined";

/// Configuration for the DocuSign client.
#[derive(Debug, Clone)]
pub struct DocuSignConfig {
    /// Scheme used to reach the OAuth host. Only tests change this.
    pub oauth_scheme: String,
    /// Lifetime of the signed assertion in seconds.
    pub jwt_lifetime_secs: i64,
}

impl Default for DocuSignConfig {
    fn default() -> Self {
        Self {
            oauth_scheme: "https".to_string(),
            jwt_lifetime_secs: JWT_LIFETIME_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Response of the userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
}

/// One account visible to the impersonated user.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub account_id: String,
    #[serde(default, deserialize_with = "bool_or_string")]
    pub is_default: bool,
    #[serde(default)]
    pub account_name: String,
    pub base_uri: String,
}

/// Accept `true` as well as `"true"`; the flag shows up in both forms.
fn bool_or_string<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.eq_ignore_ascii_case("true"),
    })
}

/// Pick the account flagged as default.
///
/// Never falls back to the first account.
pub fn select_default_account(accounts: &[Account]) -> Result<&Account> {
    accounts
        .iter()
        .find(|account| account.is_default)
        .ok_or(OAuthError::NoDefaultAccount)
}

/// Build the REST base path from an account base URI.
pub fn compose_base_path(base_uri: &str) -> String {
    format!("{}{}", base_uri.trim_end_matches('/'), REST_API_SUFFIX)
}

/// Client for the DocuSign endpoints the proxy uses.
#[derive(Debug, Clone)]
pub struct DocuSignProvider {
    client: Client,
    config: DocuSignConfig,
}

impl DocuSignProvider {
    /// Create a client with default config.
    pub fn new() -> Self {
        Self::with_config(DocuSignConfig::default())
    }

    /// Create with custom config.
    pub fn with_config(config: DocuSignConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Get the config.
    pub fn config(&self) -> &DocuSignConfig {
        &self.config
    }

    fn oauth_url(&self, host: &str, path: &str) -> String {
        format!("{}://{}{}", self.config.oauth_scheme, host, path)
    }

    /// Exchange a signed assertion for an access token.
    async fn request_jwt_user_token(&self, credentials: &Credentials) -> Result<TokenResponse> {
        let assertion =
            build_assertion(credentials, Utc::now(), self.config.jwt_lifetime_secs)?;
        let url = self.oauth_url(credentials.oauth_host(), "/oauth/token");

        let response = self
            .client
            .post(&url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
            .send()
            .await
            .map_err(|e| OAuthError::Network(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| {
                OAuthError::Serialization(format!("Failed to parse token response: {}", e))
            })
    }

    /// Look up the accounts visible to the token's user.
    pub async fn get_user_info(&self, oauth_host: &str, access_token: &str) -> Result<UserInfo> {
        let url = self.oauth_url(oauth_host, "/oauth/userinfo");

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuthError::Network(format!("Userinfo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| OAuthError::Serialization(format!("Failed to parse userinfo: {}", e)))
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthResult> {
        let credentials = credentials.clone().sanitized();
        tracing::debug!(
            key_header = first_line(&credentials.private_key),
            oauth_host = credentials.oauth_host(),
            "Requesting JWT user token"
        );

        let token = self.request_jwt_user_token(&credentials).await?;
        let user_info = self
            .get_user_info(credentials.oauth_host(), &token.access_token)
            .await?;
        let account = select_default_account(&user_info.accounts)?;

        AuthResult {
            access_token: token.access_token,
            account_id: account.account_id.clone(),
            base_path: compose_base_path(&account.base_uri),
            expires_in: token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
        }
        .validate()
    }

    /// Download an envelope's combined document.
    pub async fn get_combined_document(
        &self,
        auth: &AuthInfo,
        envelope_id: &str,
    ) -> Result<Vec<u8>> {
        let url = format!(
            "{}/v2.1/accounts/{}/envelopes/{}/documents/{}",
            auth.base_path.trim_end_matches('/'),
            urlencoding::encode(&auth.api_account_id),
            urlencoding::encode(envelope_id),
            COMBINED_DOCUMENT
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&auth.access_token)
            .header(header::ACCEPT, "application/pdf")
            .send()
            .await
            .map_err(|e| OAuthError::Network(format!("Document request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| OAuthError::Network(format!("Failed to read document: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

impl Default for DocuSignProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignatureProvider for DocuSignProvider {
    async fn exchange_token(&self, credentials: &Credentials) -> Result<AuthResult> {
        match self.authenticate(credentials).await {
            Ok(result) => {
                tracing::info!(
                    client_id = %credentials.client_id,
                    account_id = %result.account_id,
                    "JWT authentication succeeded"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::error!(
                    client_id = %credentials.client_id,
                    user_id = %credentials.user_id,
                    status = ?e.status(),
                    error = %e,
                    "JWT authentication failed; check consent and private key"
                );
                Err(e)
            }
        }
    }

    async fn fetch_document(&self, auth: &AuthInfo, envelope_id: &str) -> Result<Vec<u8>> {
        self.get_combined_document(auth, envelope_id)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    envelope_id,
                    status = ?e.status(),
                    error = %e,
                    "Document download failed"
                );
            })
    }
}

/// Turn a non-success response into [`OAuthError::Provider`].
///
/// JSON bodies are kept as-is; anything else is wrapped as
/// `{"error_description": <text>}`.
async fn provider_error(response: reqwest::Response) -> OAuthError {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());

    let body = serde_json::from_str(&text)
        .unwrap_or_else(|_| serde_json::json!({ "error_description": text }));

    OAuthError::Provider { status, body }
}
