// ABOUTME: HTTP middleware for the coach proxy
// ABOUTME: Cross-cutting request handling layered onto the axum router
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod cors;

pub use cors::setup_cors;
