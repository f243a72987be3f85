// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credit plans offered for purchase.

use serde::Serialize;
use strum::Display;

use crate::pricing::CREDIT_PRICE_USD;

/// How a plan is priced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanKind {
    /// A fixed bundle of credits for a fixed price.
    Bundle { credits: u64, price_usd: f64 },
    /// Any amount of credits at a per-credit price.
    PerCredit { price_usd: f64 },
}

/// Plan identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanId {
    Rookie,
    Pro,
    Custom,
}

/// A purchasable credit plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditPlan {
    pub id: PlanId,
    pub description: &'static str,
    pub kind: PlanKind,
    /// Shown as the recommended plan.
    pub highlighted: bool,
    pub badge: Option<&'static str>,
}

impl CreditPlan {
    /// Display line for the price, e.g. `5.99 USD` or `0.03 USD per credit`.
    pub fn price_label(&self) -> String {
        match self.kind {
            PlanKind::Bundle { price_usd, .. } => format!("{price_usd} USD"),
            PlanKind::PerCredit { price_usd } => format!("{price_usd} USD per credit"),
        }
    }

    /// Display line for the credit amount.
    pub fn credits_label(&self) -> String {
        match self.kind {
            PlanKind::Bundle { credits, .. } => format!("{credits} Credits"),
            PlanKind::PerCredit { .. } => "Custom Credits".to_string(),
        }
    }
}

/// The plan catalog, in display order.
pub fn credit_plans() -> Vec<CreditPlan> {
    vec![
        CreditPlan {
            id: PlanId::Rookie,
            description: "Get started with 200 credits, perfect for simple tasks.",
            kind: PlanKind::Bundle {
                credits: 200,
                price_usd: 5.99,
            },
            highlighted: false,
            badge: None,
        },
        CreditPlan {
            id: PlanId::Pro,
            description: "Upgrade to 2000 credits, unlock the full potential.",
            kind: PlanKind::Bundle {
                credits: 2000,
                price_usd: 49.99,
            },
            highlighted: true,
            badge: Some("18% Discount"),
        },
        CreditPlan {
            id: PlanId::Custom,
            description: "Buy a custom amount of credits.",
            kind: PlanKind::PerCredit {
                price_usd: CREDIT_PRICE_USD,
            },
            highlighted: false,
            badge: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_and_contents() {
        let plans = credit_plans();
        let ids: Vec<_> = plans.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PlanId::Rookie, PlanId::Pro, PlanId::Custom]);

        assert_eq!(
            plans[0].kind,
            PlanKind::Bundle {
                credits: 200,
                price_usd: 5.99
            }
        );
        assert_eq!(plans[0].price_label(), "5.99 USD");
        assert_eq!(plans[2].price_label(), "0.03 USD per credit");
        assert_eq!(plans[2].credits_label(), "Custom Credits");
    }

    #[test]
    fn only_pro_is_highlighted() {
        let highlighted: Vec<_> = credit_plans()
            .into_iter()
            .filter(|p| p.highlighted)
            .collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].id, PlanId::Pro);
        assert_eq!(highlighted[0].badge, Some("18% Discount"));
        assert_eq!(highlighted[0].credits_label(), "2000 Credits");
    }

    #[test]
    fn plans_serialize_with_kind_tag() {
        let json = serde_json::to_value(&credit_plans()[2]).unwrap();
        assert_eq!(json["id"], "custom");
        assert_eq!(json["kind"]["kind"], "per_credit");
    }
}
