//! The narrow seam between the HTTP surface and the signature provider.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::{OAuthError, Result};
use crate::types::{AuthInfo, AuthResult, Credentials};

// ============================================================================
// SignatureProvider Trait
// ============================================================================

/// Operations the proxy needs from the signature provider.
#[async_trait]
pub trait SignatureProvider: Send + Sync + std::fmt::Debug {
    /// Run the JWT grant and resolve the default account.
    async fn exchange_token(&self, credentials: &Credentials) -> Result<AuthResult>;

    /// Download the combined document of an envelope.
    async fn fetch_document(&self, auth: &AuthInfo, envelope_id: &str) -> Result<Vec<u8>>;
}

/// Shared provider for use across handlers.
pub type SharedProvider = Arc<dyn SignatureProvider>;

/// Fetch an envelope's combined document as standard base64 text.
pub async fn fetch_document_base64(
    provider: &dyn SignatureProvider,
    auth: &AuthInfo,
    envelope_id: &str,
) -> Result<String> {
    let bytes = provider.fetch_document(auth, envelope_id).await?;
    tracing::info!(
        envelope_id,
        bytes = bytes.len(),
        "Envelope document converted to base64"
    );
    Ok(STANDARD.encode(bytes))
}

// ============================================================================
// StaticProvider (for testing)
// ============================================================================

/// Canned outcome for a [`StaticProvider`] call.
#[derive(Debug, Clone)]
enum Canned<T> {
    Ok(T),
    Provider { status: u16, body: serde_json::Value },
    Local(String),
}

impl<T: Clone> Canned<T> {
    fn resolve(&self) -> Result<T> {
        match self {
            Canned::Ok(value) => Ok(value.clone()),
            Canned::Provider { status, body } => Err(OAuthError::Provider {
                status: *status,
                body: body.clone(),
            }),
            Canned::Local(msg) => Err(OAuthError::Network(msg.clone())),
        }
    }
}

/// In-memory provider returning fixed results, for tests and local runs.
#[derive(Debug)]
pub struct StaticProvider {
    token: Canned<AuthResult>,
    document: Canned<Vec<u8>>,
    exchange_count: AtomicU32,
    fetch_count: AtomicU32,
}

impl StaticProvider {
    /// Provider that always authenticates with `result` and has no documents.
    pub fn new(result: AuthResult) -> Self {
        Self {
            token: Canned::Ok(result),
            document: Canned::Provider {
                status: 404,
                body: serde_json::json!({"errorCode": "ENVELOPE_DOES_NOT_EXIST"}),
            },
            exchange_count: AtomicU32::new(0),
            fetch_count: AtomicU32::new(0),
        }
    }

    /// Provider whose token exchange is rejected with the given status and body.
    pub fn rejecting(status: u16, body: serde_json::Value) -> Self {
        Self {
            token: Canned::Provider { status, body },
            ..Self::new(AuthResult {
                access_token: String::new(),
                account_id: String::new(),
                base_path: String::new(),
                expires_in: 0,
            })
        }
    }

    /// Provider whose token exchange fails without a provider status.
    pub fn unreachable(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            token: Canned::Local(message.clone()),
            document: Canned::Local(message),
            ..Self::rejecting(500, serde_json::Value::Null)
        }
    }

    /// Serve `bytes` for every document request.
    pub fn with_document(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.document = Canned::Ok(bytes.into());
        self
    }

    pub fn exchange_count(&self) -> u32 {
        self.exchange_count.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SignatureProvider for StaticProvider {
    async fn exchange_token(&self, credentials: &Credentials) -> Result<AuthResult> {
        self.exchange_count.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(client_id = %credentials.client_id, "StaticProvider: token exchange");
        self.token.resolve()?.validate()
    }

    async fn fetch_document(&self, _auth: &AuthInfo, envelope_id: &str) -> Result<Vec<u8>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(envelope_id, "StaticProvider: document fetch");
        self.document.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> AuthResult {
        AuthResult {
            access_token: "tok123".into(),
            account_id: "A1".into(),
            base_path: "https://demo.docusign.net/restapi".into(),
            expires_in: 3600,
        }
    }

    fn creds() -> Credentials {
        Credentials::new("C1", "U1", "account-d.docusign.com", "key")
    }

    #[tokio::test]
    async fn test_static_provider_counts_calls() {
        let provider = StaticProvider::new(result());
        let auth = provider.exchange_token(&creds()).await.unwrap();
        assert_eq!(auth.access_token, "tok123");
        provider.exchange_token(&creds()).await.unwrap();
        assert_eq!(provider.exchange_count(), 2);
        assert_eq!(provider.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_rejecting_provider_keeps_body() {
        let provider =
            StaticProvider::rejecting(400, serde_json::json!({"error": "consent_required"}));
        let err = provider.exchange_token(&creds()).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.provider_body().unwrap()["error"], "consent_required");
    }

    #[tokio::test]
    async fn test_fetch_document_base64() {
        let provider = StaticProvider::new(result()).with_document(b"%PDF-1.4".to_vec());
        let auth = AuthInfo::from(&result());
        let encoded = fetch_document_base64(&provider, &auth, "env-1").await.unwrap();
        assert_eq!(encoded, "JVBERi0xLjQ=");
        assert_eq!(provider.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_document_is_an_error() {
        let provider = StaticProvider::new(result());
        let auth = AuthInfo::from(&result());
        let err = fetch_document_base64(&provider, &auth, "missing")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_unreachable_provider() {
        let provider = StaticProvider::unreachable("connection refused");
        let err = provider.exchange_token(&creds()).await.unwrap_err();
        assert!(matches!(err, OAuthError::Network(_)));
        assert_eq!(err.status(), None);
    }
}
