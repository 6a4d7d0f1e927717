// ABOUTME: Coach route handlers for AI coaching requests
// ABOUTME: Provides the stateless coach endpoint bridging identity auth and the AI gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coach routes for AI coaching requests
//!
//! This module handles the single coaching endpoint. Every request is
//! authenticated against the identity provider, mapped to a system prompt
//! by coaching type, and forwarded to the AI gateway exactly once. No
//! state is kept between requests.

use crate::{
    auth::bearer_token,
    errors::AppError,
    llm::{build_system_prompt, ChatMessage, ChatRequest, CoachingType},
    server::ServerResources,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Inbound coaching request
#[derive(Debug, Deserialize)]
pub struct CoachRequest {
    /// User's message to the coach
    pub message: String,
    /// Coaching category; unknown or absent values select the general coach
    #[serde(rename = "type", default)]
    pub coaching_type: CoachingType,
    /// Arbitrary client-supplied context interpolated into the system prompt
    #[serde(rename = "userContext", default)]
    pub user_context: Option<Value>,
}

/// Successful coaching response
#[derive(Debug, Serialize, Deserialize)]
pub struct CoachResponse {
    /// Assistant text from the AI gateway
    pub response: String,
}

// ============================================================================
// Coach Routes
// ============================================================================

/// Coach routes handler
pub struct CoachRoutes;

impl CoachRoutes {
    /// Create all coach routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/coach",
                post(Self::coach).options(Self::preflight),
            )
            .with_state(resources)
    }

    /// Extract and authenticate the user from the authorization header
    async fn authenticate(
        headers: &axum::http::HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<crate::auth::AuthenticatedUser, AppError> {
        let auth_header = headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::auth_required("No authorization header"))?;

        resources
            .identity
            .verify_token(bearer_token(auth_header))
            .await
    }

    /// Handle a coaching request end to end
    ///
    /// Authenticates the bearer token, builds the system prompt for the
    /// requested coaching type, and makes exactly one gateway call. The
    /// handler holds no state; a failure at any stage is terminal for
    /// the request.
    async fn coach(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Json(request): Json<CoachRequest>,
    ) -> Result<Json<CoachResponse>, AppError> {
        let user = Self::authenticate(&headers, &resources).await?;

        debug!(
            user_id = %user.user_id,
            coaching_type = %request.coaching_type,
            "Processing coaching request"
        );

        let system_prompt =
            build_system_prompt(request.coaching_type, request.user_context.as_ref())?;

        let chat_request = ChatRequest::new(vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(request.message),
        ]);

        let completion = resources.gateway.complete(&chat_request).await?;

        info!(
            user_id = %user.user_id,
            coaching_type = %request.coaching_type,
            finish_reason = ?completion.finish_reason,
            "Coaching request completed"
        );

        Ok(Json(CoachResponse {
            response: completion.content,
        }))
    }

    /// CORS preflight short-circuit
    ///
    /// Answered before auth or any upstream call; the CORS layer attaches
    /// the allow headers.
    async fn preflight() -> StatusCode {
        StatusCode::OK
    }
}
