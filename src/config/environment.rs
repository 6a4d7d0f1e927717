// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Builds an explicit ServerConfig once at startup; no ambient env reads at request time
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration management
//!
//! All configuration is resolved once at process start via
//! [`ServerConfig::from_env`] and passed into the handlers by parameter.
//! Required secrets (gateway API key, identity provider credentials) are
//! validated here so a misconfigured deployment fails at startup instead
//! of surfacing per-request errors.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Default HTTP port for the proxy
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default upstream chat-completion gateway base URL
const DEFAULT_GATEWAY_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";

/// Default model requested from the upstream gateway
const DEFAULT_GATEWAY_MODEL: &str = "google/gemini-2.5-flash";

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Standard operational logging
    #[default]
    Info,
    /// Verbose debugging output
    Debug,
    /// Full tracing output
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// CORS allowed origins ("*" or comma-separated origin list)
    pub cors_origins: String,
    /// Identity provider client configuration
    pub identity: IdentityConfig,
    /// Upstream LLM gateway configuration
    pub gateway: GatewayConfig,
}

/// Identity provider credentials used only to validate caller tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Identity provider base URL
    pub base_url: String,
    /// Service-role key sent as the `apikey` header on verification calls
    #[serde(skip_serializing)]
    pub service_role_key: String,
}

/// Upstream chat-completion gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateway base URL (chat-completion API root)
    pub base_url: String,
    /// Gateway API key
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Fixed model identifier sent with every completion request
    pub model: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Reads a `.env` file if present. Required variables:
    /// - `AI_GATEWAY_API_KEY`: upstream gateway API key
    /// - `IDENTITY_BASE_URL`: identity provider base URL
    /// - `IDENTITY_SERVICE_ROLE_KEY`: identity provider service credential
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is absent or a value fails
    /// to parse.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())?
                .parse()
                .context("Invalid HTTP_PORT value")?,
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")?),
            cors_origins: env_var_or("CORS_ORIGINS", "*")?,

            identity: IdentityConfig {
                base_url: env::var("IDENTITY_BASE_URL")
                    .context("IDENTITY_BASE_URL not configured")?,
                service_role_key: env::var("IDENTITY_SERVICE_ROLE_KEY")
                    .context("IDENTITY_SERVICE_ROLE_KEY not configured")?,
            },

            gateway: GatewayConfig {
                base_url: env_var_or("AI_GATEWAY_BASE_URL", DEFAULT_GATEWAY_BASE_URL)?,
                api_key: env::var("AI_GATEWAY_API_KEY")
                    .context("AI_GATEWAY_API_KEY not configured")?,
                model: env_var_or("AI_GATEWAY_MODEL", DEFAULT_GATEWAY_MODEL)?,
            },
        };

        Ok(config)
    }

    /// One-line configuration summary for startup logging, secrets redacted
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "http_port={} log_level={} cors_origins={} identity_base_url={} gateway_base_url={} model={}",
            self.http_port,
            self.log_level,
            self.cors_origins,
            self.identity.base_url,
            self.gateway.base_url,
            self.gateway.model
        )
    }
}

/// Read an environment variable with a default fallback
fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_owned()))
}
