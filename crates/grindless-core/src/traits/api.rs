// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote API trait.

use async_trait::async_trait;

use crate::error::GrindlessError;
use crate::types::{AccountInfo, ApiResponse, SummaryKind, SummaryResult};

/// The Grindless HTTP API as seen by the client.
///
/// Implementations only report transport-level failures as errors; the raw
/// envelope is returned otherwise and callers validate its shape.
#[async_trait]
pub trait RemoteApi: Send + Sync + 'static {
    /// `GET /api/accounts/@me` with a bearer token.
    async fn get_my_info(
        &self,
        access_token: &str,
    ) -> Result<ApiResponse<AccountInfo>, GrindlessError>;

    /// `POST /api/oauth/access/google` exchanging an authorization code for an access token.
    async fn exchange_google_code(
        &self,
        code: &str,
    ) -> Result<ApiResponse<String>, GrindlessError>;

    /// `POST /api/services/summarize`.
    async fn summarize(
        &self,
        access_token: &str,
        kind: SummaryKind,
        text: &str,
    ) -> Result<ApiResponse<SummaryResult>, GrindlessError>;
}
