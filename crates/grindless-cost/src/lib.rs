// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credit pricing for Grindless services.
//!
//! Every paid operation is priced in credits from the length of its input;
//! credits are bought in plans and are worth [`CREDIT_PRICE_USD`] each.

pub mod plans;
pub mod pricing;

pub use plans::{CreditPlan, PlanId, PlanKind, credit_plans};
pub use pricing::{
    CREDIT_PRICE_USD, SUMMARY_1000_TOKENS_COST, TOKEN_WEIGHT, credits_to_usd, estimate_tokens,
    price,
};
