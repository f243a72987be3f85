// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `grindless summarize`.

use std::path::Path;

use grindless_config::model::GrindlessConfig;
use grindless_core::SummaryKind;
use grindless_services::SummaryService;

use crate::app::{CliError, open_session, read_input};

/// Summarizes text for the signed-in user. The summary goes to stdout, the
/// billing line to stderr.
pub async fn run_summarize(
    config: &GrindlessConfig,
    kind: SummaryKind,
    file: Option<&Path>,
    text: Option<String>,
) -> Result<(), CliError> {
    let text = read_input(file, text)?;

    let session = open_session(config).await?;
    session.bootstrap().await;

    let service = SummaryService::new(session);
    tracing::info!(
        kind = kind.label(),
        estimate = SummaryService::price_for(&text),
        "summarizing"
    );
    let result = service.summarize(kind, &text).await?;

    println!("{}", result.message);
    eprintln!(
        "{} tokens, {} credit(s) used ({:.2} USD), {} remaining. Model: {}",
        result.tokens_processed,
        result.operation_cost_in_credits,
        result.operation_cost_in_usd,
        result.remaining_credits,
        result.model
    );
    Ok(())
}
