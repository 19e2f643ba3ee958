//! Serve command - runs the proxy server.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Args;

use dsproxy_config::{ProxyConfig, apply_process_env, load_config};
use dsproxy_oauth::{DocuSignConfig, DocuSignProvider};
use dsproxy_server::{Server, ServerConfig};

use super::Context;

/// Arguments for the serve command.
///
/// CLI arguments override environment variables, which override the config file.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Reject token requests without an AppToken header
    #[arg(long)]
    pub require_app_token: bool,
}

impl ServeArgs {
    fn apply(&self, config: &mut ProxyConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if self.require_app_token {
            config.server.require_app_token = true;
        }
    }
}

/// Run the serve command.
pub async fn run(args: ServeArgs, ctx: &Context) -> Result<()> {
    let mut config = load_config(ctx.config_path.as_deref()).context("loading config")?;
    apply_process_env(&mut config).context("reading environment")?;
    args.apply(&mut config);

    let server_config = ServerConfig::from_proxy_config(&config)?;
    let provider = DocuSignProvider::with_config(DocuSignConfig {
        oauth_scheme: config.docusign.oauth_scheme.clone(),
        ..Default::default()
    });

    tracing::info!(
        require_app_token = server_config.require_app_token,
        default_client_id = server_config.defaults.client_id.is_some(),
        default_private_key = server_config.defaults.private_key.is_some(),
        "Proxy configured"
    );
    tracing::info!(
        "Endpoints: POST /api/get-token, POST /token-proxy, POST /download-document, \
         GET /health, GET /"
    );

    Server::new(Arc::new(provider), server_config)
        .run_until(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
