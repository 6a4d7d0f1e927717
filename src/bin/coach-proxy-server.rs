// ABOUTME: Server binary for the coach proxy
// ABOUTME: Loads configuration, initializes logging, and serves the HTTP API

//! # Coach Proxy Server Binary
//!
//! Starts the stateless coaching proxy: configuration comes from the
//! environment, secrets are validated before the listener binds.

use anyhow::Result;
use clap::Parser;
use coach_proxy::{
    config::ServerConfig,
    logging,
    server::{CoachProxyServer, ServerResources},
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "coach-proxy-server")]
#[command(about = "Coach Proxy - stateless AI coaching endpoint for fitness clients")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment; missing secrets fail startup here
    let mut config = ServerConfig::from_env()?;

    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_with_level(&config.log_level)?;

    info!("Starting Coach Proxy");
    info!("{}", config.summary());

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(config)?);

    CoachProxyServer::new(resources).run(port).await
}
