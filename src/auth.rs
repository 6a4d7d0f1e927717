// ABOUTME: Identity provider client for bearer token verification
// ABOUTME: Resolves an Authorization header into an authenticated user id for one request
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication against the external identity provider
//!
//! The proxy holds no sessions of its own. Each request's bearer token is
//! verified against the identity provider's user endpoint; the resulting
//! [`AuthenticatedUser`] lives for the duration of that request only and
//! is never cached.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::config::IdentityConfig;
use crate::errors::AppError;

/// Connection timeout for the identity provider
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Request timeout for token verification
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Caller identity derived from a verified bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Opaque user identifier issued by the identity provider
    pub user_id: Uuid,
}

/// User payload returned by the identity provider's user endpoint
#[derive(Debug, Deserialize)]
struct IdentityUser {
    id: String,
}

/// Client for validating caller tokens against the identity provider
///
/// The proxy never reads or writes user data through this client; its only
/// call is the token-to-user lookup.
pub struct IdentityClient {
    client: Client,
    config: IdentityConfig,
}

impl IdentityClient {
    /// Create a new client with the given identity provider configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: IdentityConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Verify a bearer token and resolve the calling user
    ///
    /// Any rejection by the identity provider maps to the single
    /// client-facing message `Unauthorized`; transport failures reaching
    /// the provider surface as external service errors instead.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::auth_invalid`] when the token is rejected, or an
    /// external service error when the identity provider is unreachable.
    #[instrument(skip(self, token))]
    pub async fn verify_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let url = format!(
            "{}/auth/v1/user",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .header("apikey", &self.config.service_role_key)
            .send()
            .await
            .map_err(|e| {
                warn!("Identity provider request failed: {}", e);
                AppError::external_service("Identity provider", format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!("Token verification rejected with status {}", status);
            return Err(AppError::auth_invalid("Unauthorized"));
        }

        let user: IdentityUser = response
            .json()
            .await
            .map_err(|_| AppError::auth_invalid("Unauthorized"))?;

        let user_id =
            Uuid::parse_str(&user.id).map_err(|_| AppError::auth_invalid("Unauthorized"))?;

        debug!(user_id = %user_id, "Token verified");
        Ok(AuthenticatedUser { user_id })
    }
}

/// Extract the bearer token from an `Authorization` header value
///
/// Accepts the raw token as well, mirroring the permissive prefix strip the
/// clients rely on.
#[must_use]
pub fn bearer_token(header_value: &str) -> &str {
    header_value.strip_prefix("Bearer ").unwrap_or(header_value)
}
