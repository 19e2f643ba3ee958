//! Health and service information endpoints.

use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Service name reported by `/health` and `/`.
pub const SERVICE_NAME: &str = "DocuSign JWT Proxy";

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `online` while the process serves requests.
    pub status: String,
    pub service: String,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}

/// Simple health check (no auth required).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "online".to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Service metadata and endpoint listing.
pub async fn service_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "getToken": "POST /api/get-token",
            "tokenProxy": "POST /token-proxy",
            "download": "POST /download-document",
            "health": "GET /health"
        },
        "documentation": "POST credentials to /api/get-token"
    }))
}

/// Create health and info routes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
}
