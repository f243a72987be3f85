// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./grindless.toml` > `~/.config/grindless/grindless.toml`
//! > `/etc/grindless/grindless.toml` with environment variable overrides via the
//! `GRINDLESS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::GrindlessConfig;

/// Path of the system-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/grindless/grindless.toml";

/// Name of the local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "grindless.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/grindless/grindless.toml`
/// 3. `~/.config/grindless/grindless.toml`
/// 4. `./grindless.toml`
/// 5. `GRINDLESS_*` environment variables
pub fn load_config() -> Result<GrindlessConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<GrindlessConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GrindlessConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GrindlessConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GrindlessConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for the standard hierarchy, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(GrindlessConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/grindless/grindless.toml`, when a config dir exists.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("grindless").join("grindless.toml"))
}

/// Environment provider with explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `GRINDLESS_OAUTH_GOOGLE_CLIENT_ID` must map to
/// `oauth.google_client_id`, not `oauth.google.client.id`. Only the leading
/// section name is mapped, so `client_` inside a key name is left alone.
fn env_provider() -> Env {
    Env::prefixed("GRINDLESS_").map(|key| map_env_key(key.as_str()).into())
}

/// `OAUTH_GOOGLE_CLIENT_ID` -> `oauth.google_client_id`. Figment keeps the
/// variable's original case, so the key is lowercased before matching.
fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    SECTIONS
        .iter()
        .find_map(|section| {
            key.strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|rest| format!("{section}.{rest}"))
        })
        .unwrap_or(key)
}

const SECTIONS: &[&str] = &["client", "api", "oauth", "storage"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections_regardless_of_case() {
        assert_eq!(map_env_key("OAUTH_GOOGLE_CLIENT_ID"), "oauth.google_client_id");
        assert_eq!(map_env_key("API_TIMEOUT_SECS"), "api.timeout_secs");
        assert_eq!(map_env_key("client_log_level"), "client.log_level");
        assert_eq!(map_env_key("STORAGE_DATABASE_PATH"), "storage.database_path");
    }

    #[test]
    fn unknown_env_key_is_passed_through_lowercased() {
        assert_eq!(map_env_key("VERBOSE"), "verbose");
    }
}
