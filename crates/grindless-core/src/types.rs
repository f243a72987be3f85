// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire and domain types shared by the API client, the session layer and the services.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Epoch timestamp as produced by the API.
pub type Timestamp = i64;

/// An account profile as returned by `GET /api/accounts/@me`.
///
/// Read-only to the client: it is cached and displayed, never mutated.
/// Only `id` is required; identity fields the server omits decode empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub google_id: Option<String>,
    #[serde(default)]
    pub billing_id: Option<i64>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flags")]
    pub flags: Vec<i64>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub deletion_requested_at: Option<Timestamp>,
    #[serde(default)]
    pub deletion_reason: Option<String>,
}

impl Account {
    /// Returns true if the account carries the given flag.
    pub fn has_flag(&self, flag: AccountFlag) -> bool {
        self.flags.contains(&flag.value())
    }

    /// All recognised flags on this account. Unknown values are skipped.
    pub fn known_flags(&self) -> Vec<AccountFlag> {
        self.flags
            .iter()
            .filter_map(|v| AccountFlag::from_value(*v))
            .collect()
    }
}

/// A flag as it appears on the wire: the server sends names, older caches hold integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Value(i64),
    Name(String),
}

/// Decodes `flags` from integers or snake_case names. Unknown names are dropped.
fn deserialize_flags<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<RawFlag>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|flag| match flag {
            RawFlag::Value(value) => Some(value),
            RawFlag::Name(name) => AccountFlag::from_str(&name).ok().map(AccountFlag::value),
        })
        .collect())
}

/// Account flags as stored by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum AccountFlag {
    Developer,
    Administrator,
    Moderator,
    Support,
    Partner,
    Verified,
    Beta,
}

impl AccountFlag {
    /// The integer the server uses for this flag.
    pub fn value(self) -> i64 {
        match self {
            AccountFlag::Developer => 1,
            AccountFlag::Administrator => 2,
            AccountFlag::Moderator => 4,
            AccountFlag::Support => 8,
            AccountFlag::Partner => 16,
            AccountFlag::Verified => 32,
            AccountFlag::Beta => 64,
        }
    }

    pub fn from_value(value: i64) -> Option<Self> {
        use strum::IntoEnumIterator;
        AccountFlag::iter().find(|f| f.value() == value)
    }
}

/// Billing snapshot for an account.
///
/// Only `credits` is guaranteed; the remaining fields default when the server omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Billing {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub account_id: i64,
    pub credits: i64,
    #[serde(default)]
    pub total_spent_usd: f64,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

impl Billing {
    /// A billing snapshot holding only a credit balance.
    pub fn with_credits(credits: i64) -> Self {
        Self {
            id: 0,
            account_id: 0,
            credits,
            total_spent_usd: 0.0,
            created_at: 0,
            updated_at: 0,
        }
    }
}

/// Outcome marker of every API envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Success {
    Ok,
    Error,
}

/// The envelope every Grindless endpoint answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: Success,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// An `ok` envelope carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: Success::Ok,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// An `error` envelope with no data.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: Success::Error,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.success == Success::Ok
    }

    /// The server message, or a generic fallback when the server sent none.
    pub fn message_or_default(&self) -> String {
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "request failed".to_string())
    }
}

/// Payload of `GET /api/accounts/@me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(default)]
    pub account: Option<Account>,
    #[serde(default)]
    pub billing: Option<Billing>,
}

/// Payload of `POST /api/services/summarize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub message: String,
    pub model: String,
    #[serde(alias = "tokens_proccesed")]
    pub tokens_processed: u64,
    pub operation_cost_in_credits: i64,
    pub operation_cost_in_usd: f64,
    pub remaining_credits: i64,
}

/// Output format requested from the summarizer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    #[default]
    Plain,
    Json,
    Html,
    MarkdownTable,
}

impl SummaryKind {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            SummaryKind::Plain => "Plain Text",
            SummaryKind::Json => "JSON",
            SummaryKind::Html => "HTML",
            SummaryKind::MarkdownTable => "Markdown",
        }
    }
}
