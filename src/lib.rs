// ABOUTME: Main library entry point for the coach proxy
// ABOUTME: Provides a stateless HTTP bridge between fitness clients and an AI gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Coach Proxy
//!
//! A stateless HTTP proxy that fronts an OpenAI-compatible AI gateway with
//! fitness coaching prompts. Each request is authenticated against an
//! identity provider, mapped to one of four fixed coaching system prompts,
//! and forwarded to the gateway exactly once.
//!
//! ## Request flow
//!
//! 1. Bearer token verified against the identity provider
//! 2. System prompt selected by coaching type, with the client-supplied
//!    context serialized into it
//! 3. Single chat-completion call to the gateway
//! 4. First choice content returned as `{"response": "<text>"}`
//!
//! No conversation state, rate limiting, or persistence lives here; the
//! proxy holds only configuration and two pooled HTTP clients.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use coach_proxy::config::ServerConfig;
//! use coach_proxy::server::{CoachProxyServer, ServerResources};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let port = config.http_port;
//!     let resources = Arc::new(ServerResources::new(config)?);
//!     CoachProxyServer::new(resources).run(port).await
//! }
//! ```

/// Identity provider client and bearer token handling
pub mod auth;
/// Configuration management from environment variables
pub mod config;
/// Error types and HTTP error mapping
pub mod errors;
/// AI gateway client, chat types, and coaching prompts
pub mod llm;
/// Logging configuration and initialization
pub mod logging;
/// HTTP middleware (CORS)
pub mod middleware;
/// HTTP route definitions and handlers
pub mod routes;
/// Server resources and router assembly
pub mod server;
