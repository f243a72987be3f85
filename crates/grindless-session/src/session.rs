// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session facade handed to commands and services.

use std::sync::Arc;

use grindless_core::{Clock, KeyValueStore, RemoteApi};

use crate::bootstrap::{BootstrapOutcome, Bootstrapper};
use crate::cache::SessionCache;
use crate::state::SessionContext;
use crate::token::TokenStore;

/// Everything one application load needs to know about the user.
///
/// Cheap to clone; clones share state, storage and the bootstrap run.
#[derive(Clone)]
pub struct Session {
    context: SessionContext,
    cache: SessionCache,
    tokens: TokenStore,
    api: Arc<dyn RemoteApi>,
    bootstrapper: Bootstrapper,
}

impl Session {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        api: Arc<dyn RemoteApi>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let context = SessionContext::new();
        let cache = SessionCache::new(store.clone(), clock.clone());
        let tokens = TokenStore::new(store);
        let bootstrapper = Bootstrapper::new(
            context.clone(),
            cache.clone(),
            tokens.clone(),
            api.clone(),
            clock,
        );
        Self {
            context,
            cache,
            tokens,
            api,
            bootstrapper,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn api(&self) -> &Arc<dyn RemoteApi> {
        &self.api
    }

    /// Resolves the signed-in user. See [`Bootstrapper::run`].
    pub async fn bootstrap(&self) -> BootstrapOutcome {
        self.bootstrapper.run().await
    }
}
