//! Environment overlay.
//!
//! Environment variables override the config file. The lookup is injected so
//! tests can run without touching the process environment.

use std::path::PathBuf;

use crate::{ConfigError, ProxyConfig, Result};

pub const PORT_VAR: &str = "PORT";
pub const HOST_VAR: &str = "HOST";
pub const CLIENT_ID_VAR: &str = "DS_JWT_CLIENT_ID";
pub const USER_ID_VAR: &str = "DS_IMPERSONATED_USER_GUID";
pub const OAUTH_SERVER_VAR: &str = "DS_OAUTH_SERVER";
pub const PRIVATE_KEY_VAR: &str = "DS_PRIVATE_KEY";
pub const PRIVATE_KEY_PATH_VAR: &str = "DS_PRIVATE_KEY_PATH";

/// Apply overrides from `lookup`. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(port) = get(PORT_VAR) {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: PORT_VAR.to_string(),
                value: port.clone(),
            })?;
    }
    if let Some(host) = get(HOST_VAR) {
        config.server.host = host;
    }

    let docusign = &mut config.docusign;
    if let Some(v) = get(CLIENT_ID_VAR) {
        docusign.client_id = Some(v);
    }
    if let Some(v) = get(USER_ID_VAR) {
        docusign.user_id = Some(v);
    }
    if let Some(v) = get(OAUTH_SERVER_VAR) {
        docusign.oauth_server = Some(v);
    }
    if let Some(v) = get(PRIVATE_KEY_VAR) {
        docusign.private_key = Some(v);
    }
    if let Some(v) = get(PRIVATE_KEY_PATH_VAR) {
        docusign.private_key_path = PathBuf::from(v);
    }

    Ok(())
}

/// Apply overrides from the process environment.
pub fn apply_process_env(config: &mut ProxyConfig) -> Result<()> {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}
