// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `grindless config`: prints the validated, merged configuration.

use grindless_config::model::GrindlessConfig;
use grindless_core::GrindlessError;

use crate::app::CliError;

pub fn run_config(config: &GrindlessConfig) -> Result<(), CliError> {
    println!("{}", render_config(config)?);
    Ok(())
}

fn render_config(config: &GrindlessConfig) -> Result<String, GrindlessError> {
    let body = toml::to_string_pretty(config)
        .map_err(|e| GrindlessError::Internal(format!("failed to render configuration: {e}")))?;
    Ok(format!(
        "# Effective configuration (API: {})\n\n{body}",
        config.api.base_url()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_config_round_trips() {
        let config = GrindlessConfig::default();
        let rendered = render_config(&config).unwrap();
        assert!(rendered.starts_with("# Effective configuration (API: https://api.grindless.com)"));
        assert!(rendered.contains("[api]"));

        let reparsed = grindless_config::load_and_validate_str(&rendered).unwrap();
        assert_eq!(reparsed.api.api_domain, config.api.api_domain);
        assert_eq!(reparsed.oauth.redirect_uris, config.oauth.redirect_uris);
    }
}
