// ABOUTME: Route module organization for the coach proxy HTTP endpoints
// ABOUTME: Provides centralized route definitions organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route module for the coach proxy
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the auth and llm layers.

/// Coaching request routes
pub mod coach;
/// Health check and system status routes
pub mod health;

pub use coach::{CoachRequest, CoachResponse, CoachRoutes};
pub use health::HealthRoutes;
