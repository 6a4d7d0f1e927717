// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports the axum request helper and mock upstream servers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;
pub mod mock_upstream;
