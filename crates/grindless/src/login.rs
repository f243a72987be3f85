// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `grindless login` and `grindless logout`.

use grindless_api::google_authorization_url;
use grindless_config::model::GrindlessConfig;
use grindless_session::CallbackOutcome;

use crate::app::{CliError, open_session};

/// Without a code, prints the Google sign-in URL. With a code, completes the
/// callback and reports who is signed in.
pub async fn run_login(config: &GrindlessConfig, code: Option<&str>) -> Result<(), CliError> {
    let Some(code) = code else {
        let url = google_authorization_url(&config.oauth, config.api.production)?;
        println!("Open this URL to sign in with Google:");
        println!();
        println!("  {url}");
        println!();
        println!("Then run: grindless login --code <CODE>");
        return Ok(());
    };

    let session = open_session(config).await?;
    let outcome = session.complete_google_login(code).await;
    tracing::debug!(destination = %outcome.destination(), "oauth callback handled");

    match outcome {
        CallbackOutcome::SignedIn => {
            session.bootstrap().await;
            match session.context().snapshot().profile {
                Some(account) => println!("Signed in as {} <{}>", account.name, account.email),
                None => println!("Signed in, but the account could not be loaded."),
            }
            Ok(())
        }
        CallbackOutcome::NoCode => {
            println!("No authorization code given, nothing to do.");
            Ok(())
        }
        CallbackOutcome::EmptyToken => {
            println!("The server did not issue a token. Try signing in again.");
            Ok(())
        }
        CallbackOutcome::Failed(e) => Err(e.into()),
    }
}

pub async fn run_logout(config: &GrindlessConfig) -> Result<(), CliError> {
    let session = open_session(config).await?;
    session.logout().await?;
    println!("Signed out.");
    Ok(())
}
