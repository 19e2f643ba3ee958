//! dsproxy - DocuSign JWT-grant token proxy
//!
//! Main entry point for the dsproxy CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;

use commands::{check_key, serve};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// dsproxy - exchanges DocuSign JWT-grant credentials for access tokens
#[derive(Parser)]
#[command(name = "dsproxy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ./dsproxy.toml if present)
    #[arg(long, global = true, env = dsproxy_config::CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Console log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Also write daily-rotated JSON logs to this directory
    #[arg(long, global = true, env = "DSPROXY_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the proxy server (default)
    Serve(serve::ServeArgs),

    /// Check that a private key file sanitizes and parses
    CheckKey(check_key::CheckKeyArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = init_tracing(&cli);

    let ctx = commands::Context {
        config_path: cli.config,
        verbose: cli.verbose,
    };

    match cli.command {
        Some(Commands::Serve(args)) => serve::run(args, &ctx).await,
        Some(Commands::CheckKey(args)) => check_key::run(args, &ctx).await,
        None => serve::run(serve::ServeArgs::default(), &ctx).await,
    }
}

/// Initialize tracing: console layer plus optional rotating JSON file.
///
/// `RUST_LOG` replaces the default console filter when set.
fn init_tracing(cli: &Cli) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let default_filter = if cli.verbose {
        concat!(
            "dsproxy=debug,dsproxy_server=debug,dsproxy_oauth=debug,",
            "dsproxy_config=debug,tower_http=debug,info"
        )
    } else {
        "dsproxy=info,dsproxy_server=info,dsproxy_oauth=info,dsproxy_config=info,warn"
    };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let console = match cli.log_format {
        LogFormat::Text => fmt::layer().with_target(true).boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
    }
    .with_filter(console_filter);

    let (file_layer, guard) = match &cli.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "dsproxy.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(EnvFilter::new(concat!(
                    "dsproxy=trace,dsproxy_server=trace,dsproxy_oauth=trace,",
                    "dsproxy_config=trace,info"
                )));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .init();

    guard
}
