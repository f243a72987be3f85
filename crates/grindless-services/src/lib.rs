// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Paid services offered on the Grindless launchpad.

pub mod catalog;
pub mod summary;

pub use catalog::{ServiceItem, find_service, launchpad_services, search_services};
pub use summary::{MAX_CHARACTERS, MIN_CHARACTERS, SummaryError, SummaryService, clamp_input};
