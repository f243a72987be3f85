// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable key/value storage trait.

use async_trait::async_trait;

use crate::error::GrindlessError;

/// String key/value storage scoped to one client installation.
///
/// Absent keys are `Ok(None)`, never an error. `remove` is idempotent.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns a short backend name for logging.
    fn name(&self) -> &str;

    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, GrindlessError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), GrindlessError>;

    /// Removes `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), GrindlessError>;
}
