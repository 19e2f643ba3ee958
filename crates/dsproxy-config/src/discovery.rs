//! Config file discovery.
//!
//! Resolution order:
//! 1. Explicit path (`--config` or `DSPROXY_CONFIG`); must exist
//! 2. `./dsproxy.toml`; optional
//! 3. Built-in defaults

use std::path::Path;

use crate::{ConfigError, ProxyConfig, Result};

/// Default config filename in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "dsproxy.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "DSPROXY_CONFIG";

/// Load configuration from an explicit path, or from `./dsproxy.toml` if present.
pub fn load_config(explicit: Option<&Path>) -> Result<ProxyConfig> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    let project = Path::new(PROJECT_CONFIG_FILE);
    if project.exists() {
        return load_config_file(project);
    }

    tracing::debug!("No config file found, using defaults");
    Ok(ProxyConfig::default())
}

/// Load config from a specific file path (no discovery).
pub fn load_config_file(path: &Path) -> Result<ProxyConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    let config = ProxyConfig::from_toml(&contents)?;
    tracing::info!(path = %path.display(), "Loaded config file");
    Ok(config)
}
