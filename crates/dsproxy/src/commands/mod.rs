//! CLI command handlers.

use std::path::PathBuf;

pub mod check_key;
pub mod serve;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Explicit config file, if any.
    pub config_path: Option<PathBuf>,
    /// Verbose output enabled.
    pub verbose: bool,
}
