//! Error types for the token exchange.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, OAuthError>;

/// Errors that can occur while talking to the identity or eSignature APIs.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// The private key could not be parsed or used for signing.
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// Network/HTTP transport error.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    ///
    /// `body` is the provider's JSON error payload, relayed unchanged.
    #[error("Provider error ({status}): {body}")]
    Provider {
        status: u16,
        body: serde_json::Value,
    },

    /// The impersonated user has no account flagged as default.
    #[error("No default account found for the impersonated user")]
    NoDefaultAccount,

    /// The exchange succeeded but a required field came back empty.
    #[error("Incomplete authentication result: missing {0}")]
    IncompleteResult(&'static str),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl OAuthError {
    /// HTTP status reported by the provider, if the failure came from it.
    pub fn status(&self) -> Option<u16> {
        match self {
            OAuthError::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Provider error body, if the failure came from it.
    pub fn provider_body(&self) -> Option<&serde_json::Value> {
        match self {
            OAuthError::Provider { body, .. } => Some(body),
            _ => None,
        }
    }
}
