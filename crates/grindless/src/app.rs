// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring shared by the commands: error type, session construction and
//! input reading.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use grindless_api::ApiClient;
use grindless_config::model::GrindlessConfig;
use grindless_core::{GrindlessError, SystemClock};
use grindless_services::{SummaryError, clamp_input};
use grindless_session::Session;
use grindless_storage::SqliteStore;

/// Anything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Grindless(#[from] GrindlessError),

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error("failed to read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Opens the durable store and builds a session against the configured API.
pub async fn open_session(config: &GrindlessConfig) -> Result<Session, GrindlessError> {
    let store = SqliteStore::from_config(&config.storage).await?;
    let api = ApiClient::from_config(&config.api)?;
    tracing::debug!(
        database = store.path(),
        api = api.base_url(),
        "session backend ready"
    );
    Ok(Session::new(Arc::new(store), Arc::new(api), Arc::new(SystemClock)))
}

/// Text from the positional argument, or from `file` truncated to the
/// summarizer's maximum length.
pub fn read_input(file: Option<&Path>, text: Option<String>) -> Result<String, CliError> {
    match file {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|source| CliError::Input {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(clamp_input(&content).to_string())
        }
        None => Ok(text.unwrap_or_default()),
    }
}

/// Colors only on a terminal and when not disabled.
pub fn use_color(plain: bool) -> bool {
    !plain && std::io::stdout().is_terminal()
}
