// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The text summarizer.
//!
//! Input is validated locally before any request is made; the server then
//! charges credits and returns the summary together with the remaining
//! balance, which is mirrored into the session context and cache.

use thiserror::Error;
use tracing::{debug, info, warn};

use grindless_core::{GrindlessError, SummaryKind, SummaryResult};
use grindless_cost::{SUMMARY_1000_TOKENS_COST, TOKEN_WEIGHT, price};
use grindless_session::Session;

/// Largest accepted input: 32768 tokens.
pub const MAX_CHARACTERS: usize = 32_768 * TOKEN_WEIGHT;

/// Smallest accepted input.
pub const MIN_CHARACTERS: usize = 10;

/// Why a summary was not produced. Validation variants never reach the
/// network.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Please enter some text to summarize.")]
    Empty,

    #[error("Please enter at least {} characters to summarize.", MIN_CHARACTERS)]
    TooShort,

    #[error("Please enter less than {} characters to summarize.", MAX_CHARACTERS)]
    TooLong,

    #[error("You are not authenticated.")]
    NotAuthenticated,

    #[error("Insufficient credits to perform this operation. Buy more")]
    InsufficientCredits { required: u64, available: i64 },

    /// The server refused the request. Its message is shown as is.
    #[error("{0}")]
    Rejected(String),

    #[error("failed to summarize text: {0}")]
    Failed(#[from] GrindlessError),
}

impl SummaryError {
    /// True for failures detected before any request was sent.
    pub fn is_validation(&self) -> bool {
        !matches!(self, SummaryError::Rejected(_) | SummaryError::Failed(_))
    }
}

/// Truncates `text` to [`MAX_CHARACTERS`] characters.
pub fn clamp_input(text: &str) -> &str {
    match text.char_indices().nth(MAX_CHARACTERS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Summarizes text on behalf of the signed-in user.
#[derive(Clone)]
pub struct SummaryService {
    session: Session,
}

impl SummaryService {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Credits a summary of `text` costs.
    pub fn price_for(text: &str) -> u64 {
        price(SUMMARY_1000_TOKENS_COST, text.chars().count())
    }

    /// Checks input and session, returning the token to send.
    pub fn validate(&self, text: &str) -> Result<String, SummaryError> {
        let length = text.chars().count();
        if length == 0 {
            return Err(SummaryError::Empty);
        }
        if length < MIN_CHARACTERS {
            return Err(SummaryError::TooShort);
        }
        if length > MAX_CHARACTERS {
            return Err(SummaryError::TooLong);
        }

        let state = self.session.context().snapshot();
        let token = match state.access_token.clone() {
            Some(token) if state.authenticated && state.checked && !token.is_empty() => token,
            _ => return Err(SummaryError::NotAuthenticated),
        };

        let required = price(SUMMARY_1000_TOKENS_COST, length);
        if let Some(available) = state.credits() {
            if available < 0 || (available as u64) < required {
                return Err(SummaryError::InsufficientCredits {
                    required,
                    available,
                });
            }
        }

        Ok(token)
    }

    /// Validates, sends the request and mirrors the new balance locally.
    pub async fn summarize(
        &self,
        kind: SummaryKind,
        text: &str,
    ) -> Result<SummaryResult, SummaryError> {
        let token = self.validate(text)?;
        debug!(%kind, characters = text.chars().count(), "requesting summary");

        let response = self.session.api().summarize(&token, kind, text).await?;
        if !response.is_ok() {
            return Err(SummaryError::Rejected(response.message_or_default()));
        }
        let result = response.data.ok_or_else(|| {
            GrindlessError::MalformedResponse("summary response carried no data".to_string())
        })?;

        info!(
            tokens = result.tokens_processed,
            cost = result.operation_cost_in_credits,
            remaining = result.remaining_credits,
            "summary produced"
        );
        self.mirror_credits(result.remaining_credits).await;
        Ok(result)
    }

    async fn mirror_credits(&self, remaining: i64) {
        let context = self.session.context();
        context.set_credits(remaining);
        if let Some(billing) = context.snapshot().billing {
            if let Err(e) = self.session.cache().write_billing(&billing).await {
                warn!(error = %e, "failed to update cached billing");
            }
        }
    }
}
