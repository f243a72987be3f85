// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google sign-in completion and logout.

use strum::{Display, IntoStaticStr};
use tracing::{debug, info, warn};

use grindless_core::GrindlessError;

use crate::session::Session;

/// Where the front end should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum Destination {
    #[strum(serialize = "/")]
    Landing,
    #[strum(serialize = "/launchpad")]
    Launchpad,
}

impl Destination {
    pub fn path(self) -> &'static str {
        self.into()
    }
}

/// Result of handling the OAuth callback.
#[derive(Debug)]
pub enum CallbackOutcome {
    /// Token stored; the next bootstrap validates it.
    SignedIn,
    /// The callback carried no code. Nothing was sent.
    NoCode,
    /// The server accepted the code but returned an empty token.
    EmptyToken,
    /// Exchange failed or the token could not be stored.
    Failed(GrindlessError),
}

impl CallbackOutcome {
    pub fn destination(&self) -> Destination {
        match self {
            CallbackOutcome::Failed(_) => Destination::Landing,
            _ => Destination::Launchpad,
        }
    }
}

impl Session {
    /// Exchanges a Google authorization code for an access token and stores it.
    ///
    /// A new token invalidates any cached profile, so the next bootstrap asks
    /// the server who the user is.
    pub async fn complete_google_login(&self, code: &str) -> CallbackOutcome {
        let code = code.trim();
        if code.is_empty() {
            debug!("oauth callback without a code");
            return CallbackOutcome::NoCode;
        }

        let response = match self.api().exchange_google_code(code).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "google code exchange failed");
                return CallbackOutcome::Failed(e);
            }
        };

        if !response.is_ok() {
            let message = response.message_or_default();
            warn!(%message, "google code exchange rejected");
            return CallbackOutcome::Failed(GrindlessError::Rejected { message });
        }

        let Some(token) = response.data else {
            return CallbackOutcome::Failed(GrindlessError::MalformedResponse(
                "sign-in response carried no token".to_string(),
            ));
        };
        if token.is_empty() {
            warn!("google code exchange returned an empty token");
            return CallbackOutcome::EmptyToken;
        }

        if let Err(e) = self.tokens().set(&token).await {
            return CallbackOutcome::Failed(e);
        }
        if let Err(e) = self.cache().clear().await {
            warn!(error = %e, "failed to clear session cache after sign-in");
        }
        self.context().update(|state| state.access_token = Some(token));

        info!("signed in with Google");
        CallbackOutcome::SignedIn
    }

    /// Signs the user out locally.
    ///
    /// The in-process state is reset first, then the token and all cache
    /// entries are removed. Every removal is attempted even if one fails;
    /// the first failure is returned.
    pub async fn logout(&self) -> Result<Destination, GrindlessError> {
        self.context().sign_out();

        let token_result = self.tokens().clear().await;
        let cache_result = self.cache().clear().await;
        token_result?;
        cache_result?;

        info!("signed out");
        Ok(Destination::Landing)
    }
}
