// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Grindless client.

use thiserror::Error;

/// The primary error type used across the Grindless traits and client operations.
#[derive(Debug, Error)]
pub enum GrindlessError {
    /// Configuration errors (missing client id, invalid header values, bad URLs).
    #[error("configuration error: {0}")]
    Config(String),

    /// Durable storage errors (database open, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Transport errors: network unreachable, timeouts, non-2xx responses.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The response body was not a usable API envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The API answered with `success: "error"`. The message is shown verbatim.
    #[error("{message}")]
    Rejected { message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GrindlessError {
    /// Wraps any storage backend error.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        GrindlessError::Storage {
            source: Box::new(err),
        }
    }

    /// Returns true for errors that originate from the network layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, GrindlessError::Transport { .. })
    }
}
