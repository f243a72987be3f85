// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP access to the Grindless API.
//!
//! [`ApiClient`] implements [`grindless_core::RemoteApi`] over reqwest:
//! account lookup, Google code exchange and summarization. [`oauth`] builds
//! the Google authorization URL that starts sign-in.

pub mod client;
pub mod oauth;

pub use client::ApiClient;
pub use oauth::google_authorization_url;
