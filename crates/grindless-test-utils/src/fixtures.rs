// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sample data for tests.

use grindless_core::{Account, AccountInfo, ApiResponse, Billing, SummaryResult};

/// A valid account with the given id.
pub fn sample_account(id: i64) -> Account {
    Account {
        id,
        account_id: format!("acc_{id}"),
        google_id: Some("10987654321".to_string()),
        billing_id: Some(3),
        email: "ada@example.com".to_string(),
        username: "ada".to_string(),
        name: "Ada Lovelace".to_string(),
        avatar: Some("https://example.com/ada.png".to_string()),
        flags: vec![64],
        created_at: 1_700_000_000,
        updated_at: 1_700_000_100,
        deleted: false,
        deletion_requested_at: None,
        deletion_reason: None,
    }
}

/// A billing snapshot holding `credits`.
pub fn sample_billing(credits: i64) -> Billing {
    Billing {
        id: 3,
        account_id: 1,
        credits,
        total_spent_usd: 1.5,
        created_at: 1_700_000_000,
        updated_at: 1_700_000_100,
    }
}

/// `GET /api/accounts/@me` success envelope.
pub fn ok_account_info(id: i64, credits: i64) -> ApiResponse<AccountInfo> {
    ApiResponse::ok(
        "Account found",
        AccountInfo {
            account: Some(sample_account(id)),
            billing: Some(sample_billing(credits)),
        },
    )
}

/// A summary result that leaves `remaining_credits` on the account.
pub fn sample_summary(remaining_credits: i64) -> SummaryResult {
    SummaryResult {
        message: "A short summary.".to_string(),
        model: "claude-3-haiku-20240307".to_string(),
        tokens_processed: 250,
        operation_cost_in_credits: 1,
        operation_cost_in_usd: 0.03,
        remaining_credits,
    }
}
