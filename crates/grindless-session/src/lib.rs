// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session management for the Grindless client.
//!
//! A [`Session`] ties together the durable [`TokenStore`] and [`SessionCache`],
//! the in-process [`SessionContext`] and the remote API. On startup the
//! [`Bootstrapper`] resolves whether the user is signed in, trusting a cached
//! profile for [`FRESHNESS_WINDOW_MS`] before asking the server again.

pub mod auth;
pub mod bootstrap;
pub mod cache;
pub mod session;
pub mod state;
pub mod token;

pub use auth::{CallbackOutcome, Destination};
pub use bootstrap::{BootstrapOutcome, Bootstrapper};
pub use cache::{CachedSession, FRESHNESS_WINDOW_MS, SessionCache};
pub use session::Session;
pub use state::{SessionContext, SessionState};
pub use token::TokenStore;
