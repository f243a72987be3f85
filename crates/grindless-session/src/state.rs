// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process session state.
//!
//! [`SessionContext`] is the single owner of the [`SessionState`] for one
//! application load. It is a `watch` channel: readers take snapshots or
//! subscribe to changes, writers modify in place, last write wins.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use grindless_core::{Account, Billing};

/// What the client currently knows about the signed-in user.
#[derive(Clone, Default, PartialEq)]
pub struct SessionState {
    /// True only with a non-empty token and a profile obtained within the
    /// freshness window.
    pub authenticated: bool,
    /// Set once bootstrap has resolved.
    pub checked: bool,
    pub access_token: Option<String>,
    pub profile: Option<Account>,
    pub billing: Option<Billing>,
}

impl SessionState {
    /// Known credit balance, if billing has been loaded.
    pub fn credits(&self) -> Option<i64> {
        self.billing.as_ref().map(|b| b.credits)
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("authenticated", &self.authenticated)
            .field("checked", &self.checked)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("profile", &self.profile)
            .field("billing", &self.billing)
            .finish()
    }
}

/// Shared handle to the session state. Clones observe the same state.
#[derive(Clone)]
pub struct SessionContext {
    tx: Arc<watch::Sender<SessionState>>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self { tx: Arc::new(tx) }
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Applies `f` to the state and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut SessionState)) {
        self.tx.send_modify(f);
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().authenticated
    }

    pub fn is_checked(&self) -> bool {
        self.tx.borrow().checked
    }

    pub fn access_token(&self) -> Option<String> {
        self.tx.borrow().access_token.clone()
    }

    /// Overwrites the known credit balance. No-op when billing is not loaded.
    pub fn set_credits(&self, credits: i64) {
        self.update(|state| {
            if let Some(billing) = state.billing.as_mut() {
                billing.credits = credits;
            }
        });
    }

    /// Forgets the user. `checked` is kept.
    pub fn sign_out(&self) {
        self.update(|state| {
            state.authenticated = false;
            state.access_token = None;
            state.profile = None;
            state.billing = None;
        });
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionContext")
            .field(&*self.tx.borrow())
            .finish()
    }
}
