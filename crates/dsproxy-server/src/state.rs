//! Application state shared across handlers.

use std::sync::Arc;

use dsproxy_oauth::SharedProvider;

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// Holds only static configuration and the provider client; nothing here is
/// written while serving requests.
#[derive(Clone)]
pub struct AppState {
    /// Signature provider used for token exchange and downloads.
    pub provider: SharedProvider,

    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(provider: SharedProvider, config: ServerConfig) -> Self {
        Self {
            provider,
            config: Arc::new(config),
        }
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
