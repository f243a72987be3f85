// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credit cost of an operation from its input length.
//!
//! Characters are converted to tokens at [`TOKEN_WEIGHT`] characters per token,
//! then charged per started block of 1000 tokens. Every operation costs at
//! least one credit.

/// Characters per token.
pub const TOKEN_WEIGHT: usize = 4;

/// USD value of one credit.
pub const CREDIT_PRICE_USD: f64 = 0.03;

/// Credits charged by the summarizer per 1000 tokens.
pub const SUMMARY_1000_TOKENS_COST: u32 = 1;

/// Approximate token count for `text_length` characters. Fractional.
pub fn estimate_tokens(text_length: usize) -> f64 {
    text_length as f64 / TOKEN_WEIGHT as f64
}

/// Credits charged for `text_length` characters at `cost_per_1000_tokens`.
///
/// Formula: `max(1, ceil(len / 4 / 1000 * cost))`.
pub fn price(cost_per_1000_tokens: u32, text_length: usize) -> u64 {
    let raw = estimate_tokens(text_length) / 1000.0 * f64::from(cost_per_1000_tokens);
    (raw.ceil() as u64).max(1)
}

/// USD value of `credits`.
pub fn credits_to_usd(credits: u64) -> f64 {
    credits as f64 * CREDIT_PRICE_USD
}
