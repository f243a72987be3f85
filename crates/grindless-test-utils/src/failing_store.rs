// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A key/value store that always fails.

use async_trait::async_trait;

use grindless_core::{GrindlessError, KeyValueStore};

/// Every operation returns a storage error. Used to check that storage
/// failures are logged or surfaced rather than panicking.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

fn failure(op: &str, key: &str) -> GrindlessError {
    GrindlessError::storage(std::io::Error::other(format!("{op} `{key}` failed")))
}

#[async_trait]
impl KeyValueStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, GrindlessError> {
        Err(failure("get", key))
    }

    async fn set(&self, key: &str, _value: &str) -> Result<(), GrindlessError> {
        Err(failure("set", key))
    }

    async fn remove(&self, key: &str) -> Result<(), GrindlessError> {
        Err(failure("remove", key))
    }
}
