// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline commands: `price`, `plans` and `services`.

use std::path::Path;

use serde::Serialize;

use grindless_cost::{CreditPlan, credit_plans, credits_to_usd, estimate_tokens, price};
use grindless_services::{ServiceItem, launchpad_services, search_services};

use crate::app::{CliError, read_input};

/// Structured output of `grindless price`.
#[derive(Debug, Serialize)]
pub struct PriceEstimate {
    pub characters: usize,
    pub tokens: f64,
    pub cost_per_1000_tokens: u32,
    pub credits: u64,
    pub usd: f64,
}

impl PriceEstimate {
    pub fn for_text(cost_per_1000_tokens: u32, text: &str) -> Self {
        let characters = text.chars().count();
        let credits = price(cost_per_1000_tokens, characters);
        Self {
            characters,
            tokens: estimate_tokens(characters),
            cost_per_1000_tokens,
            credits,
            usd: credits_to_usd(credits),
        }
    }
}

pub fn run_price(cost: u32, file: Option<&Path>, text: Option<String>) -> Result<(), CliError> {
    let text = read_input(file, text)?;
    let estimate = PriceEstimate::for_text(cost, &text);
    println!(
        "{} characters (~{:.0} tokens) at {} credit(s) per 1000 tokens: {} credit(s) (~{:.2} USD)",
        estimate.characters,
        estimate.tokens,
        estimate.cost_per_1000_tokens,
        estimate.credits,
        estimate.usd
    );
    Ok(())
}

pub fn run_plans(json: bool) -> Result<(), CliError> {
    let plans = credit_plans();
    if json {
        print_json(&plans);
        return Ok(());
    }
    for plan in &plans {
        println!("{}", format_plan(plan));
    }
    Ok(())
}

fn format_plan(plan: &CreditPlan) -> String {
    let mut line = format!(
        "{:<8} {:<16} {:<22} {}",
        plan.id.to_string(),
        plan.credits_label(),
        plan.price_label(),
        plan.description
    );
    if let Some(badge) = plan.badge {
        line.push_str(&format!(" [{badge}]"));
    }
    line
}

pub fn run_services(query: Option<&str>, json: bool) -> Result<(), CliError> {
    let services = match query {
        Some(query) => search_services(query),
        None => launchpad_services(),
    };
    if json {
        print_json(&services);
        return Ok(());
    }
    if services.is_empty() {
        println!("No services found.");
    }
    for service in &services {
        println!("{}", format_service(service));
    }
    Ok(())
}

fn format_service(service: &ServiceItem) -> String {
    let status = if service.available { "" } else { " (coming soon)" };
    format!(
        "{:<18} {}{status}\n    {} credit(s) per 1000 tokens. {}",
        service.id, service.name, service.cost_per_1000_tokens, service.description
    )
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "[]".to_string())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_for_empty_text_is_one_credit() {
        let estimate = PriceEstimate::for_text(1, "");
        assert_eq!(estimate.characters, 0);
        assert_eq!(estimate.credits, 1);
        assert!((estimate.usd - 0.03).abs() < 1e-9);
    }

    #[test]
    fn estimate_counts_characters_not_bytes() {
        let estimate = PriceEstimate::for_text(1, "ééé");
        assert_eq!(estimate.characters, 3);
    }

    #[test]
    fn estimate_scales_with_cost() {
        let text = "a".repeat(40_000);
        assert_eq!(PriceEstimate::for_text(1, &text).credits, 10);
        assert_eq!(PriceEstimate::for_text(2, &text).credits, 20);
    }

    #[test]
    fn pro_plan_line_shows_badge() {
        let plans = credit_plans();
        let line = format_plan(&plans[1]);
        assert!(line.starts_with("Pro"));
        assert!(line.contains("2000 Credits"));
        assert!(line.contains("49.99 USD"));
        assert!(line.ends_with("[18% Discount]"));
    }

    #[test]
    fn unavailable_service_is_marked() {
        let services = launchpad_services();
        assert!(!format_service(&services[0]).contains("coming soon"));
        assert!(format_service(&services[1]).contains("coming soon"));
    }
}
