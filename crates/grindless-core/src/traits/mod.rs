// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seam traits for the Grindless client.
//!
//! Storage and remote API traits use `#[async_trait]` so implementations can be
//! held behind `Arc<dyn ...>` and swapped for in-memory versions in tests.

pub mod api;
pub mod clock;
pub mod storage;

pub use api::RemoteApi;
pub use clock::{Clock, SystemClock};
pub use storage::KeyValueStore;
