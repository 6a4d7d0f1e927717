// ABOUTME: Upstream chat-completion gateway client over the OpenAI-compatible wire format
// ABOUTME: One synchronous completion call per request; no retries, streaming, or caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Gateway Client
//!
//! Client for the upstream chat-completion gateway. The wire format is the
//! `OpenAI`-compatible `{model, messages:[{role, content}]}` request and
//! `{choices:[{message:{content}}]}` response.
//!
//! Gateway failures map to fixed client-facing errors:
//! - HTTP 429 becomes [`ErrorCode::ExternalRateLimited`] with a fixed
//!   retry message
//! - HTTP 402 becomes [`ErrorCode::ExternalQuotaExhausted`] with a fixed
//!   credits message
//! - any other non-2xx status becomes a generic external service error

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, TokenUsage};
use crate::config::GatewayConfig;
use crate::errors::{AppError, ErrorCode};

/// Connection timeout for the gateway
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Request timeout; model generation can be slow
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Fixed client-facing message for upstream rate limiting
const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again in a moment.";

/// Fixed client-facing message for exhausted upstream credits
const QUOTA_MESSAGE: &str = "AI credits depleted. Please add credits to continue.";

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

/// Chat completion API request structure
#[derive(Debug, Serialize)]
struct GatewayApiRequest {
    model: String,
    messages: Vec<GatewayApiMessage>,
}

/// Message structure for the completion API
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GatewayApiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for GatewayApiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

/// Chat completion API response structure
#[derive(Debug, Deserialize)]
struct GatewayApiResponse {
    choices: Vec<GatewayApiChoice>,
    #[serde(default)]
    usage: Option<GatewayApiUsage>,
    #[serde(default)]
    model: Option<String>,
}

/// Choice in response
#[derive(Debug, Deserialize)]
struct GatewayApiChoice {
    message: GatewayApiResponseMessage,
    finish_reason: Option<String>,
}

/// Message in response
#[derive(Debug, Deserialize)]
struct GatewayApiResponseMessage {
    content: Option<String>,
}

/// Usage statistics in response
#[derive(Debug, Deserialize)]
struct GatewayApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

// ============================================================================
// Client
// ============================================================================

/// Client for the upstream chat-completion gateway
pub struct GatewayClient {
    client: Client,
    config: GatewayConfig,
}

impl GatewayClient {
    /// Create a new gateway client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: GatewayConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Default model configured for this gateway
    #[must_use]
    pub fn default_model(&self) -> &str {
        &self.config.model
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Map a non-success gateway status to a client-facing error
    fn map_error_status(status: reqwest::StatusCode, body: &str) -> AppError {
        match status.as_u16() {
            429 => AppError::new(ErrorCode::ExternalRateLimited, RATE_LIMIT_MESSAGE),
            402 => AppError::new(ErrorCode::ExternalQuotaExhausted, QUOTA_MESSAGE),
            _ => {
                error!(
                    "AI gateway error: {} - {}",
                    status,
                    body.chars().take(200).collect::<String>()
                );
                AppError::external_service("AI gateway", format!("error status {status}"))
            }
        }
    }

    /// Perform a chat completion (non-streaming)
    ///
    /// Issues exactly one call to the gateway; the caller sees the outcome
    /// only after the call fully resolves or fails. There is no retry path.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway is unreachable, rejects the request,
    /// or returns a response with no choices.
    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.model)))]
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.config.model);

        let api_request = GatewayApiRequest {
            model: model.to_owned(),
            messages: request.messages.iter().map(GatewayApiMessage::from).collect(),
        };

        debug!(
            "Sending chat completion request with {} messages",
            api_request.messages.len()
        );

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to AI gateway: {}", e);
                AppError::external_service("AI gateway", format!("failed to connect: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read AI gateway response: {}", e);
            AppError::external_service("AI gateway", format!("failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::map_error_status(status, &body));
        }

        let api_response: GatewayApiResponse = serde_json::from_str(&body).map_err(|e| {
            error!(
                "Failed to parse AI gateway response: {} - body: {}",
                e,
                body.chars().take(500).collect::<String>()
            );
            AppError::external_service("AI gateway", format!("failed to parse response: {e}"))
        })?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service("AI gateway", "API returned no choices"))?;

        let content = choice.message.content.unwrap_or_default();

        debug!(
            "Received gateway response: {} chars, finish_reason: {:?}",
            content.len(),
            choice.finish_reason
        );

        Ok(ChatResponse {
            content,
            model: api_response.model.unwrap_or_else(|| model.to_owned()),
            usage: api_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}
