// ABOUTME: Configuration module organization for the coach proxy
// ABOUTME: Exposes environment-based server configuration loaded once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration management for the coach proxy

/// Environment-based configuration loaded at process start
pub mod environment;

pub use environment::{GatewayConfig, IdentityConfig, LogLevel, ServerConfig};
