// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The launchpad service catalog.

use serde::Serialize;

use grindless_cost::SUMMARY_1000_TOKENS_COST;

/// A service listed on the launchpad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Front-end route of the service screen.
    pub route: &'static str,
    /// Credits charged per 1000 tokens of input.
    pub cost_per_1000_tokens: u32,
    /// False for services that are listed but cannot be run yet.
    pub available: bool,
}

/// All services, in launchpad order.
pub fn launchpad_services() -> Vec<ServiceItem> {
    vec![
        ServiceItem {
            id: "summary",
            name: "Text Summarizer",
            description: "Effortlessly distill complex documents into concise, insightful summaries.",
            route: "/services/summary",
            cost_per_1000_tokens: SUMMARY_1000_TOKENS_COST,
            available: true,
        },
        ServiceItem {
            id: "scientific-paper",
            name: "Scientific Manuscript Creator",
            description: "Craft comprehensive scientific papers with precision and clarity.",
            route: "/services/scientific-paper",
            cost_per_1000_tokens: 2,
            available: false,
        },
    ]
}

pub fn find_service(id: &str) -> Option<ServiceItem> {
    launchpad_services().into_iter().find(|s| s.id == id)
}

/// Services whose name contains `query`, ignoring case. An empty query
/// matches nothing.
pub fn search_services(query: &str) -> Vec<ServiceItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    launchpad_services()
        .into_iter()
        .filter(|s| s.name.to_lowercase().contains(&query))
        .collect()
}
