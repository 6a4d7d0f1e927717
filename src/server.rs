// ABOUTME: Server assembly with centralized resource management for the coach proxy
// ABOUTME: Builds shared HTTP clients once at startup and serves the axum router
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server assembly for the coach proxy
//!
//! This module holds all shared server resources in a single `Arc`-shared
//! container, assembles the axum router from the route modules, and runs
//! the HTTP listener. Resources are constructed exactly once at startup;
//! handlers only ever borrow them.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::IdentityClient;
use crate::config::ServerConfig;
use crate::errors::AppError;
use crate::llm::GatewayClient;
use crate::middleware::setup_cors;
use crate::routes::{CoachRoutes, HealthRoutes};

/// Shared server resources
///
/// Holds the configuration and the two upstream HTTP clients. Clients
/// keep their connection pools for the lifetime of the process.
pub struct ServerResources {
    pub config: Arc<ServerConfig>,
    pub identity: Arc<IdentityClient>,
    pub gateway: Arc<GatewayClient>,
}

impl ServerResources {
    /// Create new server resources with proper `Arc` sharing
    ///
    /// # Errors
    ///
    /// Returns an error if either upstream HTTP client cannot be built.
    pub fn new(config: ServerConfig) -> Result<Self, AppError> {
        let identity = IdentityClient::new(config.identity.clone())?;
        let gateway = GatewayClient::new(config.gateway.clone())?;

        Ok(Self {
            config: Arc::new(config),
            identity: Arc::new(identity),
            gateway: Arc::new(gateway),
        })
    }
}

/// Assemble the full application router
///
/// Merges health and coach routes, then layers CORS and request tracing
/// on the outside so every route sees them.
pub fn router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(CoachRoutes::routes(resources))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Coach proxy HTTP server
pub struct CoachProxyServer {
    resources: Arc<ServerResources>,
}

impl CoachProxyServer {
    /// Create a new server from pre-built resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Run the HTTP server until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server
    /// fails while accepting connections.
    pub async fn run(self, port: u16) -> Result<()> {
        let app = router(self.resources);

        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("Failed to bind to port {port}"))?;

        info!("Coach proxy listening on http://0.0.0.0:{port}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")
    }
}

async fn shutdown_signal() {
    // Graceful shutdown on ctrl-c; SIGTERM is what container runtimes send
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received ctrl-c, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
