// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grindless - AI services for your text.
//!
//! This is the binary entry point for the Grindless command-line client.

mod app;
mod catalog;
mod login;
mod settings;
mod summarize;
mod whoami;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use grindless_core::SummaryKind;

use crate::app::CliError;

/// Grindless - AI services for your text.
#[derive(Parser, Debug)]
#[command(name = "grindless", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in with Google.
    ///
    /// Without `--code`, prints the Google sign-in URL. Open it, approve, and
    /// pass the `code` parameter of the page you are redirected to.
    Login {
        /// Authorization code from the OAuth callback.
        #[arg(long)]
        code: Option<String>,
    },
    /// Show the signed-in account and credit balance.
    Whoami {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Summarize text.
    Summarize {
        /// Output format: plain, json, html, markdown_table.
        #[arg(long, default_value = "plain")]
        kind: SummaryKind,
        /// Read the text from a file. Long files are truncated.
        #[arg(long, value_name = "PATH", conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Text to summarize.
        #[arg(required_unless_present = "file")]
        text: Option<String>,
    },
    /// Estimate the credit cost of processing text.
    Price {
        /// Credits per 1000 tokens.
        #[arg(long, default_value_t = grindless_cost::SUMMARY_1000_TOKENS_COST)]
        cost: u32,
        /// Read the text from a file.
        #[arg(long, value_name = "PATH", conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Text to price.
        #[arg(required_unless_present = "file")]
        text: Option<String>,
    },
    /// List credit plans.
    Plans {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List launchpad services.
    Services {
        /// Only show services whose name contains this.
        query: Option<String>,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Sign out and forget the cached session.
    Logout,
    /// Validate and print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => grindless_config::load_and_validate_path(path),
        None => grindless_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            grindless_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.client.log_level);

    let result: Result<(), CliError> = match cli.command {
        Some(Commands::Login { code }) => login::run_login(&config, code.as_deref()).await,
        Some(Commands::Whoami { json, plain }) => whoami::run_whoami(&config, json, plain).await,
        Some(Commands::Summarize { kind, file, text }) => {
            summarize::run_summarize(&config, kind, file.as_deref(), text).await
        }
        Some(Commands::Price { cost, file, text }) => {
            catalog::run_price(cost, file.as_deref(), text)
        }
        Some(Commands::Plans { json }) => catalog::run_plans(json),
        Some(Commands::Services { query, json }) => {
            catalog::run_services(query.as_deref(), json)
        }
        Some(Commands::Logout) => login::run_logout(&config).await,
        Some(Commands::Config) => settings::run_config(&config),
        None => {
            println!("grindless: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output on stdout stays pipeable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("grindless={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn summarize_parses_kind() {
        let cli = Cli::try_parse_from([
            "grindless",
            "summarize",
            "--kind",
            "markdown_table",
            "some text here",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Summarize { kind, text, file }) => {
                assert_eq!(kind, SummaryKind::MarkdownTable);
                assert_eq!(text.as_deref(), Some("some text here"));
                assert!(file.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn summarize_needs_input() {
        assert!(Cli::try_parse_from(["grindless", "summarize"]).is_err());
        assert!(
            Cli::try_parse_from(["grindless", "summarize", "--file", "a.txt", "text"]).is_err()
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(Cli::try_parse_from(["grindless", "summarize", "--kind", "pdf", "text"]).is_err());
    }

    #[test]
    fn price_defaults_to_summary_cost() {
        let cli = Cli::try_parse_from(["grindless", "price", "hello"]).unwrap();
        match cli.command {
            Some(Commands::Price { cost, .. }) => assert_eq!(cost, 1),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = grindless_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert!(config.api.production);
    }
}
