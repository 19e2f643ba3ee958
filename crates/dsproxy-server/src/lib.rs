//! HTTP surface of the DocuSign JWT proxy.
//!
//! # Routes
//!
//! - `POST /api/get-token`, `POST /token-proxy`: JWT grant, returns token and default account
//! - `POST /download-document`: combined envelope document as base64
//! - `GET /health`: liveness, no authentication
//! - `GET /`: service metadata
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use dsproxy_oauth::DocuSignProvider;
//! use dsproxy_server::{Server, ServerConfig};
//!
//! let server = Server::new(Arc::new(DocuSignProvider::new()), ServerConfig::default());
//! server.run().await?;
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use auth::{APP_TOKEN_HEADER, check_app_token};
pub use config::{CredentialDefaults, ServerConfig};
pub use error::{Result, ServerError};
pub use routes::{DownloadResponse, HealthResponse, TokenRequest, TokenResponse};
pub use state::AppState;

use std::net::SocketAddr;

use axum::{Router, extract::DefaultBodyLimit, routing::post};
use dsproxy_oauth::SharedProvider;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// The proxy HTTP server.
pub struct Server {
    /// Application state.
    state: AppState,
}

impl Server {
    /// Create a new server with the given provider and configuration.
    pub fn new(provider: SharedProvider, config: ServerConfig) -> Self {
        Self {
            state: AppState::new(provider, config),
        }
    }

    /// Create a server from a pre-built application state.
    pub fn from_state(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        let mut router = Router::new()
            .merge(routes::health_routes())
            .route("/api/get-token", post(routes::get_token_handler))
            .route("/token-proxy", post(routes::get_token_handler))
            .route("/download-document", post(routes::download_document_handler))
            .layer(DefaultBodyLimit::max(self.state.config.max_body_size))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone());

        if self.state.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        router
    }

    /// Run the server until the process exits.
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.bind_address;
        let listener = bind(addr).await?;
        info!(addr = %listener_addr(&listener, addr), "Starting proxy server");

        axum::serve(listener, self.router())
            .await
            .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))
    }

    /// Run until `shutdown` resolves, then drain in-flight requests.
    pub async fn run_until(
        self,
        shutdown: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let addr = self.state.config.bind_address;
        let listener = bind(addr).await?;
        info!(addr = %listener_addr(&listener, addr), "Starting proxy server");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))
    }

    /// Run with graceful shutdown in a background task, returning the bound address.
    pub async fn run_with_shutdown(
        self,
        shutdown: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<SocketAddr> {
        let listener = bind(self.state.config.bind_address).await?;
        let local_addr = listener_addr(&listener, self.state.config.bind_address);
        info!(addr = %local_addr, "Starting proxy server");

        let router = self.router();
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(shutdown)
                .await
            {
                tracing::error!(error = %e, "Server stopped with error");
            }
        });
        Ok(local_addr)
    }

    /// Get the configured bind address.
    pub fn bind_address(&self) -> SocketAddr {
        self.state.config.bind_address
    }
}

async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Internal(format!("Failed to bind {}: {}", addr, e)))
}

fn listener_addr(listener: &TcpListener, fallback: SocketAddr) -> SocketAddr {
    listener.local_addr().unwrap_or(fallback)
}
