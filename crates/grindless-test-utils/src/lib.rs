// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Grindless integration tests.
//!
//! Provides mock implementations of the core seams for fast, deterministic
//! tests without a network or a database.
//!
//! # Components
//!
//! - [`MockApi`] - Remote API with queued replies and call counters
//! - [`ManualClock`] - Clock that only moves when told to
//! - [`FailingStore`] - Key/value store whose every call fails
//! - [`fixtures`] - Sample accounts, billing and envelopes

pub mod clock;
pub mod failing_store;
pub mod fixtures;
pub mod mock_api;

pub use clock::ManualClock;
pub use failing_store::FailingStore;
pub use mock_api::{MockApi, Reply};
