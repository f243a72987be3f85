// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Grindless client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Grindless configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GrindlessConfig {
    /// Client behavior settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Remote API location.
    #[serde(default)]
    pub api: ApiConfig,

    /// Google OAuth settings.
    #[serde(default)]
    pub oauth: OAuthConfig,

    /// Durable session storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Client behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Remote API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Production mode uses HTTPS and `api_domain`; otherwise HTTP and `dev_api_domain`.
    #[serde(default = "default_production")]
    pub production: bool,

    /// Host (and optional port) of the production API.
    #[serde(default = "default_api_domain")]
    pub api_domain: String,

    /// Host (and optional port) of the development API.
    #[serde(default = "default_dev_api_domain")]
    pub dev_api_domain: String,

    /// Request timeout in seconds. `None` keeps the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// The API base URI: `http(s)://<domain>`.
    pub fn base_url(&self) -> String {
        if self.production {
            format!("https://{}", self.api_domain)
        } else {
            format!("http://{}", self.dev_api_domain)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            production: default_production(),
            api_domain: default_api_domain(),
            dev_api_domain: default_dev_api_domain(),
            timeout_secs: None,
        }
    }
}

fn default_production() -> bool {
    true
}

fn default_api_domain() -> String {
    "api.grindless.com".to_string()
}

fn default_dev_api_domain() -> String {
    "localhost:8080".to_string()
}

/// Google OAuth configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OAuthConfig {
    /// Google OAuth client id. Required for `login`.
    #[serde(default)]
    pub google_client_id: Option<String>,

    /// Redirect URIs: index 0 is used in production, index 1 in development.
    #[serde(default = "default_redirect_uris")]
    pub redirect_uris: Vec<String>,

    /// Google's authorization endpoint.
    #[serde(default = "default_authorization_endpoint")]
    pub authorization_endpoint: String,
}

impl OAuthConfig {
    /// The redirect URI for the given mode, if configured.
    pub fn redirect_uri(&self, production: bool) -> Option<&str> {
        let index = if production { 0 } else { 1 };
        self.redirect_uris.get(index).map(String::as_str)
    }
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            google_client_id: None,
            redirect_uris: default_redirect_uris(),
            authorization_endpoint: default_authorization_endpoint(),
        }
    }
}

fn default_redirect_uris() -> Vec<String> {
    vec![
        "https://grindless.com/oauth/google/callback".to_string(),
        "http://localhost:3000/oauth/google/callback".to_string(),
    ]
}

fn default_authorization_endpoint() -> String {
    "https://accounts.google.com/o/oauth2/v2/auth".to_string()
}

/// Durable session storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite file holding the token and session cache.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("grindless").join("session.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("grindless-session.db"))
        .display()
        .to_string()
}
