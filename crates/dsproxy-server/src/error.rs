//! Error types for the server.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dsproxy_oauth::OAuthError;
use thiserror::Error;

/// Server error type.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Request body is not valid JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Required fields are missing.
    #[error("Missing required fields: {}", missing.join(", "))]
    MissingFields {
        /// Every field the route requires.
        required: Vec<&'static str>,
        /// The ones this request lacked.
        missing: Vec<&'static str>,
    },

    /// `AppToken` header absent or not matching the client id.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// JWT grant or account lookup failed.
    #[error("JWT authentication failed: {0}")]
    Auth(OAuthError),

    /// Document download failed.
    #[error("Document download failed: {0}")]
    Download(OAuthError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        let (status, body) = match self {
            ServerError::InvalidJson(_) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": message }),
            ),
            ServerError::MissingFields { required, missing } => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": "Missing required fields",
                    "required": required,
                    "missing": missing,
                }),
            ),
            ServerError::Unauthorized(reason) => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "error": reason }),
            ),
            // Provider errors are relayed with the provider's own status and body.
            ServerError::Auth(OAuthError::Provider { status, body }) => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body,
            ),
            ServerError::Auth(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error_description": e.to_string() }),
            ),
            ServerError::Download(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "success": false,
                    "error": "Failed to download or convert the document",
                    "message": e.to_string(),
                    "details": e.provider_body(),
                }),
            ),
            ServerError::Config(_) | ServerError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error_description": message }),
            ),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "Server error");
        } else {
            tracing::warn!(status = %status, error = %message, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}
