// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup resolution of the signed-in user.
//!
//! Runs at most once per application load:
//!
//! 1. A fresh cached profile and billing restore the session with no network
//!    traffic. The stored token, if any, is carried over as is.
//! 2. Otherwise a stored token is checked against `GET /api/accounts/@me`.
//!    Success rewrites the cache; any failure signs the user out locally.
//! 3. Without a token the user stays anonymous.
//!
//! In every case `checked` is set when the run finishes. Failures never
//! surface as errors; they are logged at `warn` and reported through
//! [`BootstrapOutcome`].

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use grindless_core::{Account, AccountInfo, Billing, Clock, RemoteApi};

use crate::cache::{CachedSession, SessionCache};
use crate::state::SessionContext;
use crate::token::TokenStore;

/// How bootstrap resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Restored from a fresh cache; no network call.
    CacheHit,
    /// The server confirmed the stored token.
    Refreshed,
    /// The stored token or the server's answer was unusable; the local
    /// session was cleared.
    Rejected { reason: String },
    /// No stored token.
    Anonymous,
}

impl BootstrapOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, BootstrapOutcome::CacheHit | BootstrapOutcome::Refreshed)
    }
}

/// Single-flight session bootstrap.
///
/// Clones share the same run: concurrent and repeated calls to [`run`]
/// all observe the first run's outcome.
///
/// [`run`]: Bootstrapper::run
#[derive(Clone)]
pub struct Bootstrapper {
    context: SessionContext,
    cache: SessionCache,
    tokens: TokenStore,
    api: Arc<dyn RemoteApi>,
    clock: Arc<dyn Clock>,
    outcome: Arc<OnceCell<BootstrapOutcome>>,
}

impl Bootstrapper {
    pub fn new(
        context: SessionContext,
        cache: SessionCache,
        tokens: TokenStore,
        api: Arc<dyn RemoteApi>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            context,
            cache,
            tokens,
            api,
            clock,
            outcome: Arc::new(OnceCell::new()),
        }
    }

    /// Runs bootstrap, or waits for and returns the outcome of the run already
    /// in progress or finished.
    pub async fn run(&self) -> BootstrapOutcome {
        self.outcome.get_or_init(|| self.resolve()).await.clone()
    }

    /// The outcome, if a run has finished.
    pub fn outcome(&self) -> Option<BootstrapOutcome> {
        self.outcome.get().cloned()
    }

    async fn resolve(&self) -> BootstrapOutcome {
        let token = self.tokens.get().await.unwrap_or_else(|e| {
            warn!(error = %e, "failed to read access token, continuing without one");
            None
        });
        let cached = self.cache.read().await.unwrap_or_else(|e| {
            warn!(error = %e, "failed to read session cache, ignoring it");
            CachedSession::default()
        });
        let now = self.clock.now_millis();

        if cached.is_fresh(now) {
            return self.restore(token, cached);
        }
        match token {
            Some(token) => self.refresh(token).await,
            None => {
                self.context.update(|state| state.checked = true);
                debug!("no access token, session is anonymous");
                BootstrapOutcome::Anonymous
            }
        }
    }

    fn restore(&self, token: Option<String>, cached: CachedSession) -> BootstrapOutcome {
        let CachedSession {
            account, billing, ..
        } = cached;
        info!(
            account_id = account.as_ref().map(|a| a.id),
            "session restored from cache"
        );
        self.context.update(|state| {
            state.authenticated = true;
            state.checked = true;
            state.access_token = token;
            state.profile = account;
            state.billing = billing;
        });
        BootstrapOutcome::CacheHit
    }

    async fn refresh(&self, token: String) -> BootstrapOutcome {
        match self.fetch_account(&token).await {
            Ok((account, billing)) => {
                if let Err(e) = self.cache.write(&account, &billing).await {
                    warn!(error = %e, "failed to write session cache");
                }
                info!(account_id = account.id, "session refreshed from server");
                self.context.update(|state| {
                    state.authenticated = true;
                    state.checked = true;
                    state.access_token = Some(token);
                    state.profile = Some(account);
                    state.billing = Some(billing);
                });
                BootstrapOutcome::Refreshed
            }
            Err(reason) => {
                warn!(%reason, "stored session rejected, signing out locally");
                if let Err(e) = self.tokens.clear().await {
                    warn!(error = %e, "failed to clear access token");
                }
                if let Err(e) = self.cache.clear().await {
                    warn!(error = %e, "failed to clear session cache");
                }
                self.context.update(|state| {
                    state.authenticated = false;
                    state.checked = true;
                    state.access_token = None;
                    state.profile = None;
                    state.billing = None;
                });
                BootstrapOutcome::Rejected { reason }
            }
        }
    }

    /// Fetches and validates the account. The error is a human-readable reason.
    async fn fetch_account(&self, token: &str) -> Result<(Account, Billing), String> {
        let response = self
            .api
            .get_my_info(token)
            .await
            .map_err(|e| e.to_string())?;

        if !response.is_ok() {
            return Err(response.message_or_default());
        }

        let Some(AccountInfo {
            account: Some(account),
            billing: Some(billing),
        }) = response.data
        else {
            return Err("account response is missing account or billing".to_string());
        };

        if account.id <= 0 {
            return Err(format!("server returned invalid account id {}", account.id));
        }

        Ok((account, billing))
    }
}
