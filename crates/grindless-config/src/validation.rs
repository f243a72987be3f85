// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::GrindlessConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &GrindlessConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.client.log_level.to_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "client.log_level `{}` must be one of {}",
                config.client.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let (domain_key, domain) = if config.api.production {
        ("api.api_domain", &config.api.api_domain)
    } else {
        ("api.dev_api_domain", &config.api.dev_api_domain)
    };
    let domain = domain.trim();
    if domain.is_empty() {
        errors.push(ConfigError::Validation {
            message: format!("{domain_key} must not be empty"),
        });
    } else if domain.contains("://") || domain.contains('/') {
        errors.push(ConfigError::Validation {
            message: format!("{domain_key} `{domain}` must be a host[:port] without scheme or path"),
        });
    }

    if config.api.timeout_secs == Some(0) {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be at least 1 when set".to_string(),
        });
    }

    if config.oauth.redirect_uri(config.api.production).is_none() {
        let needed = if config.api.production { 1 } else { 2 };
        errors.push(ConfigError::Validation {
            message: format!(
                "oauth.redirect_uris needs at least {needed} entries for the current api.production setting"
            ),
        });
    }

    if !config.oauth.authorization_endpoint.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!(
                "oauth.authorization_endpoint `{}` must be an https URL",
                config.oauth.authorization_endpoint
            ),
        });
    }

    if let Some(client_id) = &config.oauth.google_client_id
        && client_id.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "oauth.google_client_id must not be empty when set".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
