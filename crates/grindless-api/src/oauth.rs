// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google OAuth authorization URL.
//!
//! Sign-in starts by sending the user to Google's consent screen; Google then
//! redirects back with a `code` that the API exchanges for a Grindless token.

use reqwest::Url;

use grindless_config::model::OAuthConfig;
use grindless_core::GrindlessError;

/// Scopes requested from Google.
pub const GOOGLE_SCOPE: &str = "profile email";

/// Builds the Google authorization URL for the given mode.
///
/// The redirect URI is `redirect_uris[0]` in production and `redirect_uris[1]`
/// otherwise.
pub fn google_authorization_url(
    config: &OAuthConfig,
    production: bool,
) -> Result<String, GrindlessError> {
    let client_id = config
        .google_client_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| GrindlessError::Config("oauth.google_client_id is not set".into()))?;

    let redirect_uri = config.redirect_uri(production).ok_or_else(|| {
        GrindlessError::Config(format!(
            "no oauth redirect URI configured for {} mode",
            if production { "production" } else { "development" }
        ))
    })?;

    let mut url = Url::parse(&config.authorization_endpoint).map_err(|e| {
        GrindlessError::Config(format!(
            "invalid oauth.authorization_endpoint `{}`: {e}",
            config.authorization_endpoint
        ))
    })?;

    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("scope", GOOGLE_SCOPE)
        .append_pair("prompt", "consent");

    Ok(url.into())
}
