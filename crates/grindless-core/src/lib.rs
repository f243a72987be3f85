// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Grindless client.
//!
//! This crate provides the error type, the wire types exchanged with the
//! Grindless API, and the seam traits (storage, remote API, clock) that the
//! session and service layers are written against.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GrindlessError;
pub use traits::{Clock, KeyValueStore, RemoteApi, SystemClock};
pub use types::{
    Account, AccountFlag, AccountInfo, ApiResponse, Billing, Success, SummaryKind, SummaryResult,
    Timestamp,
};
