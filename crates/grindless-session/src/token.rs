// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable access token.

use std::sync::Arc;

use grindless_core::{GrindlessError, KeyValueStore};

/// Storage key of the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// The access token over a [`KeyValueStore`].
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored token. An empty value counts as no token.
    pub async fn get(&self) -> Result<Option<String>, GrindlessError> {
        Ok(self
            .store
            .get(ACCESS_TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty()))
    }

    pub async fn set(&self, token: &str) -> Result<(), GrindlessError> {
        self.store.set(ACCESS_TOKEN_KEY, token).await
    }

    pub async fn clear(&self) -> Result<(), GrindlessError> {
        self.store.remove(ACCESS_TOKEN_KEY).await
    }
}
