// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable key/value storage for the Grindless client.
//!
//! [`SqliteStore`] persists the access token and session cache across runs;
//! [`MemoryStore`] keeps everything in process, for tests.

pub mod memory;
pub mod schema;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
