// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `grindless whoami` command implementation.
//!
//! Bootstraps the session (cache first, then the account endpoint) and shows
//! the profile and credit balance.

use serde::Serialize;

use grindless_config::model::GrindlessConfig;
use grindless_core::Account;
use grindless_cost::credits_to_usd;
use grindless_session::{BootstrapOutcome, SessionState};

use crate::app::{CliError, open_session, use_color};

/// Structured output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub authenticated: bool,
    /// `cache`, `server`, `rejected` or `anonymous`.
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub account: Option<Account>,
    pub credits: Option<i64>,
    pub credits_usd: Option<f64>,
}

impl WhoamiResponse {
    fn new(outcome: &BootstrapOutcome, state: SessionState) -> Self {
        let credits = state.credits();
        Self {
            authenticated: state.authenticated,
            source: outcome_source(outcome),
            reason: match outcome {
                BootstrapOutcome::Rejected { reason } => Some(reason.clone()),
                _ => None,
            },
            account: state.profile,
            credits,
            credits_usd: credits.map(|c| credits_to_usd(c.max(0) as u64)),
        }
    }
}

fn outcome_source(outcome: &BootstrapOutcome) -> &'static str {
    match outcome {
        BootstrapOutcome::CacheHit => "cache",
        BootstrapOutcome::Refreshed => "server",
        BootstrapOutcome::Rejected { .. } => "rejected",
        BootstrapOutcome::Anonymous => "anonymous",
    }
}

pub async fn run_whoami(config: &GrindlessConfig, json: bool, plain: bool) -> Result<(), CliError> {
    let session = open_session(config).await?;
    let outcome = session.bootstrap().await;
    let response = WhoamiResponse::new(&outcome, session.context().snapshot());

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        print_whoami(&response, use_color(plain));
    }
    Ok(())
}

fn print_whoami(response: &WhoamiResponse, use_color: bool) {
    println!();
    println!("  grindless whoami");
    println!("  {}", "-".repeat(35));

    match (&response.account, response.authenticated) {
        (Some(account), true) => {
            if use_color {
                use colored::Colorize;
                println!("    Account:  {} {}", "✓".green(), account.name.green());
            } else {
                println!("    Account:  [OK] {}", account.name);
            }
            println!("    Email:    {}", account.email);
            if !account.username.is_empty() {
                println!("    Username: {}", account.username);
            }
            if let (Some(credits), Some(usd)) = (response.credits, response.credits_usd) {
                println!("    Credits:  {credits} (~{usd:.2} USD)");
            }
            println!("    Source:   {}", response.source);
        }
        _ => {
            if use_color {
                use colored::Colorize;
                println!("    Account:  {} {}", "✗".red(), "not signed in".red());
            } else {
                println!("    Account:  [--] not signed in");
            }
            if let Some(reason) = &response.reason {
                println!("    Reason:   {reason}");
            }
            println!();
            println!("  Sign in with: grindless login");
        }
    }
    println!();
}
