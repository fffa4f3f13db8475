//! Data models exchanged with the account and transaction services

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::types::{AccountStatus, TransactionStatus};

/// Account as returned by the account service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Numeric identifier used in REST paths
    pub id: i64,
    /// Public account number, distinct from the id
    pub account_number: String,
    /// Account holder's name
    pub holder_name: String,
    #[serde(default)]
    pub email: String,
    /// Current balance
    #[serde(default, with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    /// Missing status means active
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Transaction as returned by the transaction service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub id: i64,
    /// Display identifier, e.g. `TXN1A2B3C4D`
    #[serde(default)]
    pub transaction_id: String,
    /// Source account number
    pub from_account: String,
    /// Destination account number
    pub to_account: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default)]
    pub failure_reason: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub completed_at: Option<NaiveDateTime>,
}

/// Payload for `POST /api/accounts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub holder_name: String,
    pub email: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub initial_balance: Decimal,
}

impl CreateAccountRequest {
    /// Build from raw form input. An empty or unparsable initial balance
    /// is submitted as exactly zero.
    pub fn from_form(holder_name: &str, email: &str, initial_balance: &str) -> Self {
        Self {
            holder_name: holder_name.trim().to_string(),
            email: email.trim().to_string(),
            initial_balance: Decimal::from_str(initial_balance.trim()).unwrap_or(Decimal::ZERO),
        }
    }
}

/// Payload for `POST /api/transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account: String,
    pub to_account: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
}

/// Direction of a balance update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Debit,
    Credit,
}

/// Payload for `PUT /api/accounts/{id}/balance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceUpdateRequest {
    pub account_number: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub transaction_id: String,
    pub operation_type: OperationType,
}

/// Accept ISO-8601 strings (with or without offset) and the
/// `[y, m, d, h, min, s, nanos]` array form; anything else becomes `None`.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => parse_timestamp(&s),
        serde_json::Value::Array(parts) => timestamp_from_parts(&parts),
        _ => None,
    }))
}

/// Parse a backend timestamp string
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
}

fn timestamp_from_parts(parts: &[serde_json::Value]) -> Option<NaiveDateTime> {
    let num = |i: usize| parts.get(i).and_then(|v| v.as_u64()).unwrap_or(0) as u32;
    let year = parts.first()?.as_i64()? as i32;
    let date = NaiveDate::from_ymd_opt(year, num(1), num(2))?;
    date.and_hms_nano_opt(num(3), num(4), num(5), num(6))
}
