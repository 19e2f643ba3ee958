//! JWT-grant authentication against the DocuSign identity service.
//!
//! Exchanges a client id, an impersonated user id and an RSA private key for
//! a short-lived access token, resolves the user's default account, and
//! fetches envelope documents with the resulting token.
//!
//! # Components
//!
//! - [`sanitize`]: private key cleanup before PEM parsing
//! - [`jwt`]: RS256 assertion for the JWT bearer grant
//! - [`docusign`]: reqwest client for the token, userinfo and envelope endpoints
//! - [`provider`]: the [`SignatureProvider`] seam plus an in-memory stub

pub mod docusign;
pub mod error;
pub mod jwt;
pub mod provider;
pub mod sanitize;
pub mod types;

pub use docusign::{Account, DocuSignConfig, DocuSignProvider, UserInfo};
pub use error::{OAuthError, Result};
pub use jwt::{JWT_LIFETIME_SECS, SCOPES, build_assertion};
pub use provider::{SharedProvider, SignatureProvider, StaticProvider, fetch_document_base64};
pub use sanitize::{first_line, sanitize_private_key};
pub use types::{AuthInfo, AuthResult, Credentials};
