//! Configuration system for the DocuSign JWT proxy.
//!
//! Provides TOML-based configuration with:
//! - `[server]` listener settings (host, port, CORS, body limit, AppToken policy)
//! - `[docusign]` default credentials used when a request omits them
//! - Environment overlay (`PORT`, `DS_JWT_CLIENT_ID`, ...) on top of the file
//! - Private key resolution (inline value or mounted secret file)

pub mod discovery;
pub mod env;
pub mod error;
pub mod secrets;
pub mod types;

pub use discovery::{CONFIG_ENV_VAR, PROJECT_CONFIG_FILE, load_config, load_config_file};
pub use env::{apply_env_overrides, apply_process_env};
pub use error::{ConfigError, Result};
pub use secrets::{ResolvedSecret, SecretSource, resolve_private_key};
pub use types::*;
