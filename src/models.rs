// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use std::str::FromStr;

/// Amounts come back from the API as strings ("12.50"), plain numbers, or
/// empty strings for "nothing yet". Empty and null read as zero.
pub fn coerce_decimal(v: &Value) -> Option<Decimal> {
    match v {
        Value::Null => Some(Decimal::ZERO),
        Value::Number(n) => decimal_from_str(&n.to_string()),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                Some(Decimal::ZERO)
            } else {
                decimal_from_str(t)
            }
        }
        _ => None,
    }
}

fn decimal_from_str(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn de_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    let v = Value::deserialize(d)?;
    coerce_decimal(&v).ok_or_else(|| de::Error::custom(format!("invalid amount {}", v)))
}

fn de_opt_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
    let v = Value::deserialize(d)?;
    if v.is_null() {
        return Ok(None);
    }
    coerce_decimal(&v)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid amount {}", v)))
}

fn id_from_value(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Value::deserialize(d)?;
    id_from_value(&v).ok_or_else(|| de::Error::custom(format!("invalid id {}", v)))
}

fn de_opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(id_from_value(&v))
}

// Dates arrive either as YYYY-MM-DD or as full ISO timestamps.
fn de_date<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
    let s = String::deserialize(d)?;
    let day = s.get(..10).unwrap_or(&s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(de::Error::custom)
}

fn de_opt_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    let s: Option<String> = Option::deserialize(d)?;
    match s {
        Some(s) if !s.is_empty() => {
            let day = s.get(..10).unwrap_or(&s);
            NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map(Some)
                .map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub member_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "member".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub description: String,
    #[serde(deserialize_with = "de_decimal")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(deserialize_with = "de_date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub workspace_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Transaction {
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Weekly,
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Weekly => "weekly",
            BillingCycle::Monthly => "monthly",
            BillingCycle::Yearly => "yearly",
        }
    }
}

impl FromStr for BillingCycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(BillingCycle::Weekly),
            "monthly" => Ok(BillingCycle::Monthly),
            "yearly" | "annual" => Ok(BillingCycle::Yearly),
            other => Err(format!("unknown billing cycle '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "de_decimal")]
    pub amount: Decimal,
    pub billing_cycle: BillingCycle,
    pub billing_day: u32,
    #[serde(default)]
    pub billing_month: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub next_billing_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub credit_card_id: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "de_decimal")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "de_decimal")]
    pub spent: Decimal,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub month: Option<String>, // YYYY-MM
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    pub last_four: String,
    #[serde(deserialize_with = "de_decimal")]
    pub limit: Decimal,
    #[serde(default, deserialize_with = "de_decimal")]
    pub balance: Decimal,
    pub closing_day: u32,
    pub due_day: u32,
}

impl CreditCard {
    pub fn available(&self) -> Decimal {
        self.limit - self.balance
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(deserialize_with = "de_decimal")]
    pub total_income: Decimal,
    #[serde(deserialize_with = "de_decimal")]
    pub total_expenses: Decimal,
    #[serde(deserialize_with = "de_decimal")]
    pub balance: Decimal,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub budget_used: Option<Decimal>,
    #[serde(default)]
    pub upcoming_subscriptions: Option<u32>,
}

/// Tokens returned by login, register and refresh.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    #[serde(default)]
    pub user: Option<User>,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl AuthPayload {
    /// Absolute expiry in epoch seconds; `expiresAt` wins over `expiresIn`.
    pub fn expiry(&self, now: i64) -> Option<i64> {
        self.expires_at
            .or_else(|| self.expires_in.map(|secs| now + secs))
    }
}

// Request bodies. Amounts go out as JSON numbers.

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub billing_cycle: BillingCycle,
    pub billing_day: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCreditCard {
    pub name: String,
    pub last_four: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub limit: Decimal,
    pub closing_day: u32,
    pub due_day: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transaction_amount_string_is_coerced() {
        let t: Transaction = serde_json::from_value(json!({
            "id": 7,
            "description": "Coffee",
            "amount": "4.50",
            "type": "expense",
            "date": "2025-03-02T10:00:00.000Z",
            "categoryId": null
        }))
        .unwrap();
        assert_eq!(t.id, "7");
        assert_eq!(t.amount, Decimal::new(450, 2));
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
        assert_eq!(t.category_id, None);
    }

    #[test]
    fn empty_amount_reads_as_zero() {
        let b: Budget = serde_json::from_value(json!({
            "id": "b1", "name": "Food", "amount": 200, "spent": ""
        }))
        .unwrap();
        assert_eq!(b.amount, Decimal::new(200, 0));
        assert_eq!(b.spent, Decimal::ZERO);
    }

    #[test]
    fn garbage_amount_is_rejected() {
        let r: Result<Budget, _> = serde_json::from_value(json!({
            "id": "b1", "name": "Food", "amount": "lots"
        }));
        assert!(r.is_err());
    }

    #[test]
    fn expires_at_wins_over_expires_in() {
        let p: AuthPayload = serde_json::from_value(json!({
            "accessToken": "a", "expiresAt": 5000, "expiresIn": 10
        }))
        .unwrap();
        assert_eq!(p.expiry(1000), Some(5000));
        let p: AuthPayload =
            serde_json::from_value(json!({"accessToken": "a", "expiresIn": 10})).unwrap();
        assert_eq!(p.expiry(1000), Some(1010));
    }
}
